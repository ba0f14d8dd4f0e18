//! # Country Codes
//!
//! The lookup set a name's `C` attribute is checked against: the officially
//! assigned ISO 3166-1 alpha-2 codes, the unspecified-country sentinel `ZZ`,
//! and any additional codes a deployment configures.
//!
//! Comparison is exact and case-sensitive; `us` is not `US`.

use std::collections::BTreeSet;

/// Country code for "unspecified country". Always accepted.
pub const UNSPECIFIED_COUNTRY: &str = "ZZ";

/// Officially assigned ISO 3166-1 alpha-2 codes.
pub const ISO_3166_ALPHA2: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW", "AX", "AZ",
    "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ", "BR", "BS",
    "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN",
    "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM", "DO", "DZ", "EC", "EE",
    "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR", "GA", "GB", "GD", "GE", "GF",
    "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS", "GT", "GU", "GW", "GY", "HK", "HM",
    "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR", "IS", "IT", "JE", "JM",
    "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN", "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC",
    "LI", "LK", "LR", "LS", "LT", "LU", "LV", "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK",
    "ML", "MM", "MN", "MO", "MP", "MQ", "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA",
    "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP", "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG",
    "PH", "PK", "PL", "PM", "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW",
    "SA", "SB", "SC", "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS",
    "ST", "SV", "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO",
    "TR", "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];

/// Immutable set of accepted country codes.
///
/// Built once and shared (typically inside [`NameRules`](crate::NameRules));
/// there is no process-wide mutable table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryCodes {
    extra: BTreeSet<String>,
}

impl CountryCodes {
    /// The ISO 3166-1 alpha-2 set plus `ZZ`.
    pub fn iso3166() -> Self {
        Self::default()
    }

    /// The ISO set plus `ZZ` plus the given additional codes.
    pub fn with_additional<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extra: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `code` is accepted as a country attribute.
    pub fn contains(&self, code: &str) -> bool {
        code == UNSPECIFIED_COUNTRY || ISO_3166_ALPHA2.contains(&code) || self.extra.contains(code)
    }

    /// Additional codes beyond the ISO set.
    pub fn additional(&self) -> impl Iterator<Item = &str> {
        self.extra.iter().map(String::as_str)
    }
}
