// ─────────────────────────────────────────────────────────────────────
// Ionization Simulator — Ion Notation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Spectroscopic ion names: `Fe I` is neutral iron, `Fe II` is Fe⁺.

const ROMAN: [&str; 20] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII", "XIII", "XIV",
    "XV", "XVI", "XVII", "XVIII", "XIX", "XX",
];

/// `Fe I` for charge 0, `Fe+21` once Roman numerals run out.
pub fn spectroscopic_name(symbol: &str, charge: usize) -> String {
    match ROMAN.get(charge) {
        Some(numeral) => format!("{symbol} {numeral}"),
        None => format!("{symbol}+{charge}"),
    }
}

pub fn charge_label(charge: usize) -> String {
    if charge == 0 {
        "0".to_string()
    } else {
        format!("+{charge}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spectroscopic_names() {
        assert_eq!(spectroscopic_name("Fe", 0), "Fe I");
        assert_eq!(spectroscopic_name("Fe", 1), "Fe II");
        assert_eq!(spectroscopic_name("Ar", 19), "Ar XX");
        assert_eq!(spectroscopic_name("Fe", 20), "Fe+20");
        assert_eq!(spectroscopic_name("Fe", 25), "Fe+25");
    }

    #[test]
    fn test_charge_labels() {
        assert_eq!(charge_label(0), "0");
        assert_eq!(charge_label(3), "+3");
    }
}
