//! Static country lookup used for sidebar labels.

/// (ISO code, display name, flag) for every country the dashboard knows about.
pub const COUNTRIES: &[(&str, &str, &str)] = &[
    ("BR", "Brasil", "🇧🇷"),
    ("US", "Estados Unidos", "🇺🇸"),
    ("MX", "México", "🇲🇽"),
    ("AR", "Argentina", "🇦🇷"),
    ("CO", "Colômbia", "🇨🇴"),
    ("PT", "Portugal", "🇵🇹"),
    ("PE", "Peru", "🇵🇪"),
    ("CL", "Chile", "🇨🇱"),
    ("UY", "Uruguai", "🇺🇾"),
    ("PY", "Paraguai", "🇵🇾"),
    ("BO", "Bolívia", "🇧🇴"),
    ("EC", "Equador", "🇪🇨"),
    ("VE", "Venezuela", "🇻🇪"),
    ("CA", "Canadá", "🇨🇦"),
    ("GB", "Reino Unido", "🇬🇧"),
    ("DE", "Alemanha", "🇩🇪"),
    ("FR", "França", "🇫🇷"),
    ("IT", "Itália", "🇮🇹"),
    ("ES", "Espanha", "🇪🇸"),
];

const UNKNOWN_FLAG: &str = "🌍";

fn lookup(code: &str) -> Option<&'static (&'static str, &'static str, &'static str)> {
    COUNTRIES.iter().find(|(c, _, _)| c.eq_ignore_ascii_case(code))
}

/// Display name for an ISO code, or the code itself when unknown.
pub fn country_name(code: &str) -> String {
    lookup(code)
        .map(|(_, name, _)| name.to_string())
        .unwrap_or_else(|| code.to_string())
}

pub fn country_flag(code: &str) -> &'static str {
    lookup(code).map(|(_, _, flag)| *flag).unwrap_or(UNKNOWN_FLAG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve_to_names() {
        assert_eq!(country_name("BR"), "Brasil");
        assert_eq!(country_name("ca"), "Canadá");
        assert_eq!(country_flag("US"), "🇺🇸");
    }

    #[test]
    fn unknown_codes_fall_back_to_raw_code() {
        assert_eq!(country_name("JP"), "JP");
        assert_eq!(country_flag("JP"), "🌍");
    }
}
