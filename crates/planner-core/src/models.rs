use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::budget::BudgetState;
use crate::error::{PlannerError, Result};
use crate::formatting::title_case;
use crate::regions::GermanRegion;

/// Look up a variant by its canonical lowercase name (case-insensitive,
/// surrounding whitespace ignored).
pub(crate) fn parse_variant<T: Copy>(
    all: &[T],
    name_of: fn(&T) -> &'static str,
    kind: &'static str,
    value: &str,
) -> Result<T> {
    let needle = value.trim().to_lowercase();
    all.iter()
        .copied()
        .find(|v| name_of(v) == needle)
        .ok_or_else(|| PlannerError::UnknownValue {
            kind,
            value: value.to_string(),
        })
}

// ── PlanStatus ────────────────────────────────────────────────────────────────

/// Lifecycle state of a media plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlanStatus {
    #[serde(rename = "draft")]
    Draft,
    #[serde(rename = "pending approval")]
    PendingApproval,
    #[serde(rename = "approved")]
    Approved,
    #[serde(rename = "running")]
    Running,
    #[serde(rename = "completed")]
    Completed,
}

impl PlanStatus {
    pub const ALL: [PlanStatus; 5] = [
        PlanStatus::Draft,
        PlanStatus::PendingApproval,
        PlanStatus::Approved,
        PlanStatus::Running,
        PlanStatus::Completed,
    ];

    /// The canonical lowercase identifier, as stored in plan records.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Draft => "draft",
            PlanStatus::PendingApproval => "pending approval",
            PlanStatus::Approved => "approved",
            PlanStatus::Running => "running",
            PlanStatus::Completed => "completed",
        }
    }

    /// Badge text: only the first letter is capitalised (`"Pending approval"`).
    pub fn label(&self) -> String {
        let s = self.as_str();
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl FromStr for PlanStatus {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self> {
        parse_variant(&Self::ALL, Self::as_str, "plan status", value)
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ProductType ───────────────────────────────────────────────────────────────

/// Whether the campaign advertises a product or a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Product,
    Service,
}

impl ProductType {
    pub const ALL: [ProductType; 2] = [ProductType::Product, ProductType::Service];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Product => "product",
            ProductType::Service => "service",
        }
    }
}

impl FromStr for ProductType {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self> {
        parse_variant(&Self::ALL, Self::as_str, "product type", value)
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&title_case(self.as_str()))
    }
}

// ── Industry ──────────────────────────────────────────────────────────────────

/// Client industry, used to pick recommended channels and regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    #[serde(rename = "automotive")]
    Automotive,
    #[serde(rename = "fashion")]
    Fashion,
    #[serde(rename = "food & beverage")]
    FoodAndBeverage,
    #[serde(rename = "technology")]
    Technology,
    #[serde(rename = "healthcare")]
    Healthcare,
    #[serde(rename = "finance")]
    Finance,
    #[serde(rename = "entertainment")]
    Entertainment,
    #[serde(rename = "travel")]
    Travel,
}

impl Industry {
    pub const ALL: [Industry; 8] = [
        Industry::Automotive,
        Industry::Fashion,
        Industry::FoodAndBeverage,
        Industry::Technology,
        Industry::Healthcare,
        Industry::Finance,
        Industry::Entertainment,
        Industry::Travel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Automotive => "automotive",
            Industry::Fashion => "fashion",
            Industry::FoodAndBeverage => "food & beverage",
            Industry::Technology => "technology",
            Industry::Healthcare => "healthcare",
            Industry::Finance => "finance",
            Industry::Entertainment => "entertainment",
            Industry::Travel => "travel",
        }
    }
}

impl FromStr for Industry {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self> {
        parse_variant(&Self::ALL, Self::as_str, "industry", value)
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&title_case(self.as_str()))
    }
}

// ── KpiGoal ───────────────────────────────────────────────────────────────────

/// Campaign goal selected on the goals step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KpiGoal {
    #[serde(rename = "sales")]
    Sales,
    #[serde(rename = "brand awareness")]
    BrandAwareness,
    #[serde(rename = "lead generation")]
    LeadGeneration,
    #[serde(rename = "customer retention")]
    CustomerRetention,
    #[serde(rename = "website traffic")]
    WebsiteTraffic,
    #[serde(rename = "app downloads")]
    AppDownloads,
    #[serde(rename = "social media engagement")]
    SocialMediaEngagement,
}

impl KpiGoal {
    pub const ALL: [KpiGoal; 7] = [
        KpiGoal::Sales,
        KpiGoal::BrandAwareness,
        KpiGoal::LeadGeneration,
        KpiGoal::CustomerRetention,
        KpiGoal::WebsiteTraffic,
        KpiGoal::AppDownloads,
        KpiGoal::SocialMediaEngagement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KpiGoal::Sales => "sales",
            KpiGoal::BrandAwareness => "brand awareness",
            KpiGoal::LeadGeneration => "lead generation",
            KpiGoal::CustomerRetention => "customer retention",
            KpiGoal::WebsiteTraffic => "website traffic",
            KpiGoal::AppDownloads => "app downloads",
            KpiGoal::SocialMediaEngagement => "social media engagement",
        }
    }
}

impl FromStr for KpiGoal {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self> {
        parse_variant(&Self::ALL, Self::as_str, "KPI goal", value)
    }
}

impl fmt::Display for KpiGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&title_case(self.as_str()))
    }
}

// ── Country ───────────────────────────────────────────────────────────────────

/// Target market. Only [`Country::Germany`] can be planned today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "germany")]
    Germany,
    #[serde(rename = "france")]
    France,
    #[serde(rename = "spain")]
    Spain,
    #[serde(rename = "italy")]
    Italy,
    #[serde(rename = "united kingdom")]
    UnitedKingdom,
}

impl Country {
    pub const ALL: [Country; 5] = [
        Country::Germany,
        Country::France,
        Country::Spain,
        Country::Italy,
        Country::UnitedKingdom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Country::Germany => "germany",
            Country::France => "france",
            Country::Spain => "spain",
            Country::Italy => "italy",
            Country::UnitedKingdom => "united kingdom",
        }
    }

    /// Whether campaigns can currently target this country.
    pub fn is_supported(&self) -> bool {
        matches!(self, Country::Germany)
    }
}

impl FromStr for Country {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self> {
        parse_variant(&Self::ALL, Self::as_str, "country", value)
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&title_case(self.as_str()))
    }
}

// ── Channel ───────────────────────────────────────────────────────────────────

/// An advertising medium eligible for budget assignment.
///
/// The twelve standard channels have dedicated variants; names added through
/// the channel catalog are carried as [`Channel::Custom`]. All channels are
/// stored as their lowercase name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Channel {
    TraditionalTv,
    DigitalTv,
    Streaming,
    Print,
    SocialMedia,
    DigitalBanners,
    DigitalInteractive,
    Radio,
    Podcasts,
    Outdoor,
    Dooh,
    EmailMarketing,
    Custom(String),
}

impl Channel {
    /// The standard channels in catalog order.
    pub const STANDARD: [Channel; 12] = [
        Channel::TraditionalTv,
        Channel::DigitalTv,
        Channel::Streaming,
        Channel::Print,
        Channel::SocialMedia,
        Channel::DigitalBanners,
        Channel::DigitalInteractive,
        Channel::Radio,
        Channel::Podcasts,
        Channel::Outdoor,
        Channel::Dooh,
        Channel::EmailMarketing,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Channel::TraditionalTv => "traditional tv",
            Channel::DigitalTv => "digital tv",
            Channel::Streaming => "streaming",
            Channel::Print => "print",
            Channel::SocialMedia => "social media",
            Channel::DigitalBanners => "digital banners",
            Channel::DigitalInteractive => "digital interactive",
            Channel::Radio => "radio",
            Channel::Podcasts => "podcasts",
            Channel::Outdoor => "outdoor",
            Channel::Dooh => "dooh",
            Channel::EmailMarketing => "email marketing",
            Channel::Custom(name) => name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Channel::Custom(_))
    }

    /// Title-cased display label (`"Social Media"`).
    pub fn label(&self) -> String {
        title_case(self.as_str())
    }
}

impl From<String> for Channel {
    fn from(value: String) -> Self {
        let normalised = value.trim().to_lowercase();
        Channel::STANDARD
            .iter()
            .find(|c| c.as_str() == normalised)
            .cloned()
            .unwrap_or(Channel::Custom(normalised))
    }
}

impl From<&str> for Channel {
    fn from(value: &str) -> Self {
        Channel::from(value.to_string())
    }
}

impl From<Channel> for String {
    fn from(channel: Channel) -> Self {
        channel.as_str().to_string()
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Demographics ──────────────────────────────────────────────────────────────

/// Selectable demographic option lists.
pub const AGE_RANGES: &[&str] = &["18-24", "25-34", "35-44", "45-54", "55-64", "65+"];
pub const GENDERS: &[&str] = &["all", "male", "female"];
pub const INCOME_LEVELS: &[&str] = &["low", "middle", "upper middle", "high"];
pub const INTERESTS: &[&str] = &[
    "automotive",
    "fashion",
    "food",
    "technology",
    "healthcare",
    "finance",
    "entertainment",
    "travel",
    "sports",
    "fitness",
    "luxury",
    "business",
    "family",
    "home ownership",
    "real estate",
];

/// One of the four demographic option groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemographicCategory {
    AgeRanges,
    Genders,
    Income,
    Interests,
}

impl DemographicCategory {
    /// The values a user may pick for this category.
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            DemographicCategory::AgeRanges => AGE_RANGES,
            DemographicCategory::Genders => GENDERS,
            DemographicCategory::Income => INCOME_LEVELS,
            DemographicCategory::Interests => INTERESTS,
        }
    }
}

/// Audience targeting selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    #[serde(default)]
    pub age_ranges: Vec<String>,
    #[serde(default)]
    pub genders: Vec<String>,
    #[serde(default)]
    pub income: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl Demographics {
    fn values_mut(&mut self, category: DemographicCategory) -> &mut Vec<String> {
        match category {
            DemographicCategory::AgeRanges => &mut self.age_ranges,
            DemographicCategory::Genders => &mut self.genders,
            DemographicCategory::Income => &mut self.income,
            DemographicCategory::Interests => &mut self.interests,
        }
    }

    /// Add `value` to `category` if absent, remove it if present.
    ///
    /// Returns `true` when the value is selected after the call.
    pub fn toggle(&mut self, category: DemographicCategory, value: &str) -> bool {
        let values = self.values_mut(category);
        if let Some(pos) = values.iter().position(|v| v == value) {
            values.remove(pos);
            false
        } else {
            values.push(value.to_string());
            true
        }
    }

    pub fn is_empty(&self) -> bool {
        self.age_ranges.is_empty()
            && self.genders.is_empty()
            && self.income.is_empty()
            && self.interests.is_empty()
    }
}

// ── DateRange ─────────────────────────────────────────────────────────────────

/// Inclusive campaign flight dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

// ── MediaPlan ─────────────────────────────────────────────────────────────────

/// The record produced by the wizard and kept in the plan store.
///
/// Field names serialise in camelCase so stored plan arrays stay compatible
/// with the browser application's `mediaPlans` format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPlan {
    pub id: String,
    pub client_name: String,
    pub status: PlanStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<Industry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kpi_goals: Vec<KpiGoal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<GermanRegion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<Channel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demographics: Option<Demographics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MediaPlan {
    /// An empty draft with a fresh id and both timestamps set to now.
    pub fn new_draft() -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            client_name: String::new(),
            status: PlanStatus::Draft,
            created_at: now,
            updated_at: now,
            product_type: None,
            industry: None,
            kpi_goals: Vec::new(),
            country: None,
            regions: Vec::new(),
            date_range: None,
            channels: Vec::new(),
            demographics: None,
            budget: None,
            description: None,
        }
    }

    /// Total budget, or `None` when no budget has been derived yet.
    pub fn total_budget(&self) -> Option<f64> {
        self.budget.as_ref().map(|b| b.total)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
