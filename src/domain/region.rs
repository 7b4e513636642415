use crate::error::{PaymentError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A supported jurisdiction for payment processing.
///
/// The set is closed: adding a region means extending this enum, and every
/// `match` over it (currency, rails, codes) has to be updated with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Region {
    CzechRepublic,
    Slovakia,
    Poland,
    Hungary,
}

/// Settlement currency of a [`Region`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "CZK")]
    CzechKoruna,
    #[serde(rename = "EUR")]
    Euro,
    #[serde(rename = "PLN")]
    PolishZloty,
    #[serde(rename = "HUF")]
    HungarianForint,
}

/// Settlement network a region's processors can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentRail {
    CardNetwork,
    QrPlatba,
    Sepa,
    Blik,
    Giro,
}

impl PaymentRail {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentRail::CardNetwork => "card_network",
            PaymentRail::QrPlatba => "qr_platba",
            PaymentRail::Sepa => "sepa",
            PaymentRail::Blik => "blik",
            PaymentRail::Giro => "giro",
        }
    }
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::CzechRepublic,
        Region::Slovakia,
        Region::Poland,
        Region::Hungary,
    ];

    /// The national currency payments in this region settle in.
    pub fn currency(&self) -> Currency {
        match self {
            Region::CzechRepublic => Currency::CzechKoruna,
            Region::Slovakia => Currency::Euro,
            Region::Poland => Currency::PolishZloty,
            Region::Hungary => Currency::HungarianForint,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Region::CzechRepublic => "Czech Republic",
            Region::Slovakia => "Slovakia",
            Region::Poland => "Poland",
            Region::Hungary => "Hungary",
        }
    }

    /// ISO 3166-1 alpha-2 code.
    pub fn iso_code(&self) -> &'static str {
        match self {
            Region::CzechRepublic => "CZ",
            Region::Slovakia => "SK",
            Region::Poland => "PL",
            Region::Hungary => "HU",
        }
    }

    /// Rails available to processors in this region. Card networks come first.
    pub fn rails(&self) -> &'static [PaymentRail] {
        match self {
            Region::CzechRepublic => &[PaymentRail::CardNetwork, PaymentRail::QrPlatba],
            Region::Slovakia => &[PaymentRail::CardNetwork, PaymentRail::Sepa],
            Region::Poland => &[PaymentRail::CardNetwork, PaymentRail::Blik],
            Region::Hungary => &[PaymentRail::CardNetwork, PaymentRail::Giro],
        }
    }

    fn snake_name(&self) -> &'static str {
        match self {
            Region::CzechRepublic => "czech_republic",
            Region::Slovakia => "slovakia",
            Region::Poland => "poland",
            Region::Hungary => "hungary",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = PaymentError;

    /// Accepts the display name, the ISO code or the snake_case name,
    /// case-insensitively.
    fn from_str(code: &str) -> Result<Self> {
        let trimmed = code.trim();
        Region::ALL
            .into_iter()
            .find(|region| {
                trimmed.eq_ignore_ascii_case(region.name())
                    || trimmed.eq_ignore_ascii_case(region.iso_code())
                    || trimmed.eq_ignore_ascii_case(region.snake_name())
            })
            .ok_or_else(|| PaymentError::UnrecognizedRegion(code.to_string()))
    }
}

impl TryFrom<String> for Region {
    type Error = PaymentError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.name().to_string()
    }
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::CzechKoruna => "CZK",
            Currency::Euro => "EUR",
            Currency::PolishZloty => "PLN",
            Currency::HungarianForint => "HUF",
        }
    }

    /// Number of fractional digits an amount in this currency may carry.
    pub fn minor_units(&self) -> u32 {
        match self {
            Currency::CzechKoruna
            | Currency::Euro
            | Currency::PolishZloty
            | Currency::HungarianForint => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A region bundled with its registry metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionProfile {
    pub region: Region,
    pub currency: Currency,
    pub rails: &'static [PaymentRail],
}

impl RegionProfile {
    /// The region's domestic rail, falling back to card networks.
    pub fn local_rail(&self) -> PaymentRail {
        self.rails
            .iter()
            .copied()
            .find(|rail| *rail != PaymentRail::CardNetwork)
            .unwrap_or(PaymentRail::CardNetwork)
    }
}

/// Source of truth for which regions are enabled and what they settle in.
///
/// Built once at startup and never mutated; clone it freely to share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRegistry {
    enabled: BTreeSet<Region>,
}

impl Default for RegionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionRegistry {
    /// Creates a registry with every region enabled.
    pub fn new() -> Self {
        Self::with_regions(Region::ALL)
    }

    /// Creates a registry restricted to the given regions.
    pub fn with_regions<I: IntoIterator<Item = Region>>(regions: I) -> Self {
        Self {
            enabled: regions.into_iter().collect(),
        }
    }

    /// Total over the closed region set, independent of which regions are enabled.
    pub fn currency_for(&self, region: Region) -> Currency {
        region.currency()
    }

    pub fn profile(&self, region: Region) -> RegionProfile {
        RegionProfile {
            region,
            currency: region.currency(),
            rails: region.rails(),
        }
    }

    pub fn contains(&self, region: Region) -> bool {
        self.enabled.contains(&region)
    }

    /// Parses an external region code and checks that the region is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::UnrecognizedRegion`] for unknown codes and for
    /// regions this registry does not enable.
    pub fn resolve(&self, code: &str) -> Result<Region> {
        let region: Region = code.parse()?;
        if self.contains(region) {
            Ok(region)
        } else {
            Err(PaymentError::UnrecognizedRegion(code.to_string()))
        }
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.resolve(code).is_ok()
    }

    /// Enabled regions, in declaration order.
    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.enabled.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_mapping() {
        let registry = RegionRegistry::new();
        assert_eq!(
            registry.currency_for(Region::CzechRepublic),
            Currency::CzechKoruna
        );
        assert_eq!(registry.currency_for(Region::Slovakia), Currency::Euro);
        assert_eq!(registry.currency_for(Region::Poland), Currency::PolishZloty);
        assert_eq!(
            registry.currency_for(Region::Hungary),
            Currency::HungarianForint
        );
    }

    #[test]
    fn test_currency_is_stable() {
        let registry = RegionRegistry::new();
        for region in Region::ALL {
            assert_eq!(registry.currency_for(region), registry.currency_for(region));
        }
    }

    #[test]
    fn test_parse_accepts_known_spellings() {
        assert_eq!("Czech Republic".parse::<Region>().unwrap(), Region::CzechRepublic);
        assert_eq!("czech_republic".parse::<Region>().unwrap(), Region::CzechRepublic);
        assert_eq!(" sk ".parse::<Region>().unwrap(), Region::Slovakia);
        assert_eq!("POLAND".parse::<Region>().unwrap(), Region::Poland);
    }

    #[test]
    fn test_unknown_code_is_unrecognized() {
        let registry = RegionRegistry::new();
        assert!(!registry.is_supported("Atlantis"));
        assert!(matches!(
            registry.resolve("Atlantis"),
            Err(PaymentError::UnrecognizedRegion(code)) if code == "Atlantis"
        ));
    }

    #[test]
    fn test_restricted_registry() {
        let registry = RegionRegistry::with_regions([Region::Poland]);
        assert!(registry.is_supported("PL"));
        assert!(!registry.is_supported("Hungary"));
        assert_eq!(registry.regions().collect::<Vec<_>>(), vec![Region::Poland]);
        // Currency lookup stays total for disabled regions.
        assert_eq!(
            registry.currency_for(Region::Hungary),
            Currency::HungarianForint
        );
    }

    #[test]
    fn test_profile_rails() {
        let profile = RegionRegistry::new().profile(Region::Poland);
        assert_eq!(profile.currency, Currency::PolishZloty);
        assert_eq!(profile.rails, &[PaymentRail::CardNetwork, PaymentRail::Blik]);
        assert_eq!(profile.local_rail(), PaymentRail::Blik);
    }

    #[test]
    fn test_every_region_has_a_local_rail() {
        let registry = RegionRegistry::new();
        let rails: Vec<PaymentRail> = Region::ALL
            .into_iter()
            .map(|region| registry.profile(region).local_rail())
            .collect();
        assert_eq!(
            rails,
            vec![
                PaymentRail::QrPlatba,
                PaymentRail::Sepa,
                PaymentRail::Blik,
                PaymentRail::Giro
            ]
        );
    }

    #[test]
    fn test_region_serde() {
        let json = serde_json::to_string(&Region::CzechRepublic).unwrap();
        assert_eq!(json, "\"Czech Republic\"");
        let region: Region = serde_json::from_str("\"HU\"").unwrap();
        assert_eq!(region, Region::Hungary);
        assert!(serde_json::from_str::<Region>("\"Atlantis\"").is_err());
        assert_eq!(serde_json::to_string(&Currency::Euro).unwrap(), "\"EUR\"");
    }
}
