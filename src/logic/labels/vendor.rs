//! Vendor Label Normalizer
//!
//! Engine-specific cleanup applied to a raw label before tokenization.
//! Each vendor appends its own variant/suffix conventions; removing them
//! keeps suffix noise out of the votes.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Vendors whose last '.' segment is always a variant suffix
pub static SUFFIX_REMOVAL_VENDORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Norman",
        "Avast",
        "Avira",
        "Kaspersky",
        "ESET-NOD32",
        "Fortinet",
        "Jiangmin",
        "Comodo",
        "GData",
        "Sophos",
        "BitDefenderTheta",
        "Alibaba",
        "Tencent",
        "Cyren",
        "Arcabit",
        "TrendMicro-HouseCall",
        "TrendMicro",
        "NANO-Antivirus",
        "Microsoft",
    ]
    .into_iter()
    .collect()
});

static UPPER_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]+$").expect("suffix pattern is valid"));

/// Marker Emsisoft appends when relabelling another engine's detection
const SHARED_ENGINE_SUFFIX: &str = " (B)";

/// Prefix F-Secure puts in front of Avira's labels
const WRAPPED_ENGINE_PREFIX: &str = "Malware.";

/// Normalize one vendor's label
pub fn normalize_label(vendor: &str, label: &str) -> String {
    strip_vendor_suffix(vendor, strip_engine_markers(vendor, label)).to_string()
}

/// Trim, then remove the marker a vendor adds when re-reporting another
/// engine's label. Other vendors' labels are only trimmed.
pub fn strip_engine_markers<'a>(vendor: &str, label: &'a str) -> &'a str {
    let label = label.trim();
    let stripped = match vendor {
        "Emsisoft" => label.strip_suffix(SHARED_ENGINE_SUFFIX),
        "F-Secure" => label.strip_prefix(WRAPPED_ENGINE_PREFIX),
        _ => None,
    };
    stripped.unwrap_or(label)
}

/// Drop the vendor's variant suffix
pub fn strip_vendor_suffix<'a>(vendor: &str, label: &'a str) -> &'a str {
    if SUFFIX_REMOVAL_VENDORS.contains(vendor) {
        return label.rsplit_once('.').map(|(head, _)| head).unwrap_or(label);
    }

    match vendor {
        // only an all-uppercase/digit suffix is a variant ("Generic.ABCD")
        "AVG" => match label.rsplit_once('.') {
            Some((head, tail)) if UPPER_SUFFIX.is_match(tail) => head,
            _ => label,
        },
        "Agnitum" => label.rsplit_once('!').map(|(head, _)| head).unwrap_or(label),
        _ => label,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_vendors() {
        assert_eq!(normalize_label("Kaspersky", "Trojan-Spy.Win32.Zbot.abcd"), "Trojan-Spy.Win32.Zbot");
        assert_eq!(normalize_label("Microsoft", "PWS:Win32/Zbot"), "PWS:Win32/Zbot");
    }

    #[test]
    fn test_avg_only_uppercase_suffix() {
        assert_eq!(normalize_label("AVG", "Win32/Zbot.ABCD"), "Win32/Zbot");
        assert_eq!(normalize_label("AVG", "Win32/Zbot.gen"), "Win32/Zbot.gen");
    }

    #[test]
    fn test_agnitum_bang() {
        assert_eq!(normalize_label("Agnitum", "Trojan.Zbot!abc"), "Trojan.Zbot");
    }

    #[test]
    fn test_shared_engine_markers() {
        assert_eq!(normalize_label("Emsisoft", "Trojan.Zbot.A (B)"), "Trojan.Zbot.A");
        assert_eq!(normalize_label("F-Secure", "Malware.TR/Zbot.gen"), "TR/Zbot.gen");
    }

    #[test]
    fn test_markers_only_stripped_for_their_vendor() {
        assert_eq!(strip_engine_markers("SomeAV", "Trojan.Zbot.A (B)"), "Trojan.Zbot.A (B)");
        assert_eq!(strip_engine_markers("Emsisoft", "Malware.Zbot"), "Malware.Zbot");
        assert_eq!(strip_engine_markers("F-Secure", "Trojan.Zbot (B)"), "Trojan.Zbot (B)");
        assert_eq!(strip_engine_markers("F-Secure", " Malware.TR/Zbot "), "TR/Zbot");
    }

    #[test]
    fn test_unknown_vendor_untouched() {
        assert_eq!(normalize_label("SomeAV", "  Trojan.Zbot.A "), "Trojan.Zbot.A");
    }
}
