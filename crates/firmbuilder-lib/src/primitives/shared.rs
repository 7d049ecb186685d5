/// `FromStr` for CLI value enums, accepting the same names and aliases clap does
///
/// Matching ignores case so values from `.env` files parse like flags.
macro_rules! value_enum_from_str {
    ($($enum_type:ty => $what:literal),+ $(,)?) => {
        $(
            impl FromStr for $enum_type {
                type Err = $crate::primitives::ConfigError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$enum_type as ValueEnum>::from_str(s, true).map_err(|_| {
                        $crate::primitives::ConfigError::ParseError {
                            value: s.to_string(),
                            reason: concat!("invalid ", $what).to_string(),
                        }
                    })
                }
            }
        )+
    };
}

pub(crate) use value_enum_from_str;
