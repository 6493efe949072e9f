//! Currency Registry and Rate Resolution
//!
//! This library holds the IO-free core of the converter: the closed set of
//! supported currencies with their ISO 4217 numeric identifiers, the upstream
//! rate table, and the bidirectional resolution algorithm that turns that
//! table into a conversion for a requested pair.
//!
//! Currencies are defined declaratively using a macro that generates the
//! `CurrencyCode` enum together with its symbol/numeric lookups.
//!
//! # Adding a New Currency
//! Add a line to the `define_currencies!` invocation:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     XCD => ("XCD", 951),
//! }
//! ```
//!
//! # Example
//! ```
//! use exchange_rates::{CurrencyCode, RateEntry, RateTable};
//!
//! let table = RateTable::from_rows(vec![RateEntry {
//!     currency_code_a: 840,
//!     currency_code_b: 980,
//!     rate_buy: Some(42.22),
//!     rate_sell: Some(42.7204),
//!     rate_cross: None,
//!     date: None,
//! }]);
//!
//! let converted = table
//!     .convert(CurrencyCode::USD, CurrencyCode::UAH, 100.0)
//!     .unwrap();
//! assert_eq!(converted, 4222.0);
//! ```

mod table;

pub use table::{AppliedRate, RateEntry, RateTable};

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors raised by the registry and the resolver.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExchangeError {
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Rate not available for {0} -> {1}")]
    RateNotFound(CurrencyCode, CurrencyCode),
}

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the CurrencyCode enum and its lookup tables
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define the closed currency set with generated lookups.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     Name => ("CODE", iso_numeric),
/// }
/// ```
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $numeric:literal)
        ),* $(,)?
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
        #[allow(clippy::upper_case_acronyms)]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            /// Alphabetic ISO 4217 code.
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            /// Numeric ISO 4217 identifier, as used by the upstream rate table.
            pub fn numeric(&self) -> u16 {
                match self {
                    $(CurrencyCode::$name => $numeric),*
                }
            }

            pub fn from_numeric(numeric: u16) -> Option<CurrencyCode> {
                match numeric {
                    $($numeric => Some(CurrencyCode::$name),)*
                    _ => None,
                }
            }

            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }
        }

        impl std::fmt::Display for CurrencyCode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.code())
            }
        }

        impl std::str::FromStr for CurrencyCode {
            type Err = ExchangeError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok(CurrencyCode::$name),)*
                    _ => Err(ExchangeError::UnsupportedCurrency(s.to_string())),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    USD => ("USD", 840),
    UAH => ("UAH", 980),
    EUR => ("EUR", 978),
    GBP => ("GBP", 826),
    JPY => ("JPY", 392),
    CHF => ("CHF", 756),
    CNY => ("CNY", 156),
    AED => ("AED", 784),
    AFN => ("AFN", 971),
    ALL => ("ALL", 8),
    AMD => ("AMD", 51),
    AOA => ("AOA", 973),
    ARS => ("ARS", 32),
    AUD => ("AUD", 36),
    AZN => ("AZN", 944),
    BDT => ("BDT", 50),
    BGN => ("BGN", 975),
    BHD => ("BHD", 48),
    BIF => ("BIF", 108),
    BMD => ("BMD", 96),
    BOB => ("BOB", 68),
    BRL => ("BRL", 986),
    BWP => ("BWP", 72),
    BYN => ("BYN", 933),
    CAD => ("CAD", 124),
    CLP => ("CLP", 152),
    COP => ("COP", 170),
    CRC => ("CRC", 188),
    CUP => ("CUP", 192),
    CZK => ("CZK", 203),
    DJF => ("DJF", 262),
    DKK => ("DKK", 208),
    DZD => ("DZD", 12),
    EGP => ("EGP", 818),
    ETB => ("ETB", 230),
    GEL => ("GEL", 981),
    GHS => ("GHS", 936),
    GMD => ("GMD", 270),
    GNF => ("GNF", 324),
    HKD => ("HKD", 344),
    HRK => ("HRK", 191),
    HUF => ("HUF", 348),
    IDR => ("IDR", 360),
    ILS => ("ILS", 376),
    INR => ("INR", 356),
    IQD => ("IQD", 368),
    ISK => ("ISK", 352),
    JOD => ("JOD", 400),
    KES => ("KES", 404),
    KGS => ("KGS", 417),
    KHR => ("KHR", 116),
    KRW => ("KRW", 410),
    KWD => ("KWD", 414),
    KZT => ("KZT", 398),
    LAK => ("LAK", 418),
    LBP => ("LBP", 422),
    LKR => ("LKR", 144),
    LYD => ("LYD", 434),
    MAD => ("MAD", 504),
    MDL => ("MDL", 498),
    MGA => ("MGA", 969),
    MKD => ("MKD", 807),
    MNT => ("MNT", 496),
    MUR => ("MUR", 480),
    MWK => ("MWK", 454),
    MXN => ("MXN", 484),
    MYR => ("MYR", 458),
    NAD => ("NAD", 516),
    NGN => ("NGN", 566),
    NIO => ("NIO", 558),
    NOK => ("NOK", 578),
    NPR => ("NPR", 524),
    NZD => ("NZD", 554),
    OMR => ("OMR", 512),
    PEN => ("PEN", 604),
    PHP => ("PHP", 608),
    PKR => ("PKR", 586),
    PLN => ("PLN", 985),
    PYG => ("PYG", 600),
    QAR => ("QAR", 634),
    RON => ("RON", 946),
    RSD => ("RSD", 941),
    SAR => ("SAR", 682),
    SCR => ("SCR", 690),
    SDG => ("SDG", 938),
    SEK => ("SEK", 752),
    SGD => ("SGD", 702),
    SLL => ("SLL", 694),
    SOS => ("SOS", 706),
    SRD => ("SRD", 968),
    SZL => ("SZL", 748),
    THB => ("THB", 764),
    TJS => ("TJS", 972),
    TND => ("TND", 788),
    TRY => ("TRY", 949),
    TWD => ("TWD", 901),
    TZS => ("TZS", 834),
    UGX => ("UGX", 800),
    UYU => ("UYU", 858),
    UZS => ("UZS", 860),
    VND => ("VND", 704),
    XAF => ("XAF", 950),
    XOF => ("XOF", 952),
    YER => ("YER", 886),
    ZAR => ("ZAR", 710),
}

/// Resolves a currency symbol to its numeric ISO identifier.
pub fn resolve(symbol: &str) -> Result<u16, ExchangeError> {
    symbol.parse::<CurrencyCode>().map(|c| c.numeric())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
