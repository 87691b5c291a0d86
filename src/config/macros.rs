/// Configuration macros for single-declaration config sections
///
/// `config_struct!` declares a section struct with public fields, a
/// `Default` impl built from the inline defaults, and serde support with
/// `#[serde(default)]` so partial TOML files fill in the rest.
///
/// # Example
/// ```ignore
/// config_struct! {
///     pub struct MarketplaceConfig {
///         timeout_secs: u64 = 10,
///         api_base_url: String = "https://api.opensea.io".to_string(),
///     }
/// }
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
