//! Scripted planning assistant.
//!
//! There is no language model behind this: replies come from a fixed list,
//! picked by the industry found in the conversation. [`ChatScript`] decides
//! what to say and when; playing the replies back in real time is left to the
//! runtime crate.

use std::sync::LazyLock;
use std::time::Duration;

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::budget::BudgetState;
use crate::models::{Country, DateRange, Industry, KpiGoal, MediaPlan, ProductType};
use crate::notifications::Notice;
use crate::recommendations::{recommended_channels, recommended_regions};
use crate::timeline;

// ── Script ────────────────────────────────────────────────────────────────────

pub const GREETING: &str = "Hello! I'm your Media Planning Assistant. Tell me about the campaign you'd like to create. You can describe the product or service, goals, target audience, and any preferences for channels or timing.";

/// Recommendation texts, indexed by [`response_index`].
pub const RESPONSES: [&str; 5] = [
    "Based on your requirements, I recommend focusing on digital TV and social media for your tech product campaign. These channels have shown high engagement rates for your target demographics (25-34) in Germany, particularly in Berlin and Bavaria regions. For optimal results, allocate 40% of your budget to social media, 35% to digital TV, and 25% to digital interactive content.",
    "For your fashion brand awareness campaign, I suggest a multi-channel approach with emphasis on visual platforms. Social media should be your primary channel (45%), complemented by DOOH in urban centers (30%) and digital interactive experiences (25%). Target primarily Berlin, Hamburg, and North Rhine-Westphalia regions for maximum impact.",
    "Your automotive product launch would benefit from a premium-focused media mix. I recommend traditional TV (35%) for broad reach, complemented by outdoor advertising (25%), print in high-end publications (20%), and targeted digital campaigns (20%). Focus on Baden-Württemberg, Bavaria, and North Rhine-Westphalia regions where luxury vehicle adoption rates are highest.",
    "For your financial services campaign, my analysis suggests a more conservative, trust-building approach. Allocate budget to premium print media (30%), professional digital platforms (25%), traditional TV for credibility (25%), and targeted email marketing (20%). Focus on major economic centers: Frankfurt area, Munich, Hamburg, and Berlin.",
    "Your entertainment service launch should prioritize streaming platforms and social media to reach younger demographics. I recommend allocating 40% to streaming platform advertising, 35% to social media campaigns, 15% to digital interactive experiences, and 10% to podcasts. Focus primarily on urban centers in Berlin, Hamburg, and major university cities.",
];

pub const DRAFT_READY: &str =
    "I've created a draft media plan based on our conversation. Would you like to review it now?";

pub const ACTION_MARKER: &str = "**ACTION REQUIRED**";
pub const VIEW_PLAN_ACTION: &str = "[View Media Plan]";

/// "Typing" time before a reply.
pub const REPLY_DELAY: Duration = Duration::from_millis(2000);
/// Pause between the reply and the draft-ready line.
pub const DRAFT_READY_DELAY: Duration = Duration::from_millis(5000);
/// Pause between the draft-ready line and the action marker.
pub const ACTION_DELAY: Duration = Duration::from_millis(1500);

/// Planned campaign length for proposals, in months.
pub const PROPOSAL_MONTHS: u32 = 3;

// ── Messages ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub role: ChatRole,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            role,
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Ai, content)
    }

    /// Whether this is the assistant's "view media plan" prompt.
    pub fn is_view_plan_action(&self) -> bool {
        self.role == ChatRole::Ai
            && self
                .content
                .split_once(&format!("{}: ", ACTION_MARKER))
                .is_some_and(|(_, action)| action.contains(VIEW_PLAN_ACTION))
    }
}

/// A message the assistant will send after waiting `delay` since the
/// previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedReply {
    pub delay: Duration,
    pub message: ChatMessage,
}

/// Notice shown when the user opens the proposed plan.
pub fn plan_ready_notice() -> Notice {
    Notice::success("Media plan created")
        .with_description("Your AI-generated media plan is ready to review.")
}

// ── Brief extraction ──────────────────────────────────────────────────────────

static CLIENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:[Ff]or|[Cc]lient:?)\s+(\p{Lu}[\w&\-]*(?:\s+\p{Lu}[\w&\-]*)*)")
        .expect("client pattern is valid")
});

static INDUSTRY_RULES: LazyLock<Vec<(Industry, Regex)>> = LazyLock::new(|| {
    [
        (Industry::Automotive, r"(?i)\b(automotive|cars?|vehicles?|electric vehicle|ev)\b"),
        (Industry::Fashion, r"(?i)\b(fashion|apparel|clothing|sportswear|shoes|sneakers)\b"),
        (Industry::FoodAndBeverage, r"(?i)\b(food|beverages?|drinks?|restaurants?|snacks?)\b"),
        (Industry::Technology, r"(?i)\b(tech|technology|software|saas|electronics|gadgets?)\b"),
        (Industry::Healthcare, r"(?i)\b(health|healthcare|pharma|medical|clinics?)\b"),
        (Industry::Finance, r"(?i)\b(finance|financial|banks?|banking|insurance|investments?)\b"),
        (Industry::Entertainment, r"(?i)\b(entertainment|music|movies?|films?|gaming|games)\b"),
        (Industry::Travel, r"(?i)\b(travel|airlines?|flights?|hotels?|tourism|vacations?)\b"),
    ]
    .into_iter()
    .map(|(industry, pattern)| (industry, Regex::new(pattern).expect("industry pattern is valid")))
    .collect()
});

static GOAL_RULES: LazyLock<Vec<(KpiGoal, Regex)>> = LazyLock::new(|| {
    [
        (KpiGoal::Sales, r"(?i)\b(sales|sell|revenue|purchases?)\b"),
        (KpiGoal::BrandAwareness, r"(?i)\b(awareness|visibility|brand recognition)\b"),
        (KpiGoal::LeadGeneration, r"(?i)\b(leads?|lead generation|sign-?ups?)\b"),
        (KpiGoal::CustomerRetention, r"(?i)\b(retention|loyalty|retain)\b"),
        (KpiGoal::WebsiteTraffic, r"(?i)\b(traffic|website visits)\b"),
        (KpiGoal::AppDownloads, r"(?i)\b(downloads?|installs?)\b"),
        (KpiGoal::SocialMediaEngagement, r"(?i)\b(engagement|followers|likes)\b"),
    ]
    .into_iter()
    .map(|(goal, pattern)| (goal, Regex::new(pattern).expect("goal pattern is valid")))
    .collect()
});

static SERVICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(services?|subscriptions?|insurance|banking|platform)\b")
        .expect("service pattern is valid")
});

static PRODUCT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(products?|launch|collection|models?|devices?|lineup)\b")
        .expect("product pattern is valid")
});

/// What the assistant has picked up about the campaign so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignBrief {
    pub client_name: Option<String>,
    pub industry: Option<Industry>,
    pub kpi_goals: Vec<KpiGoal>,
    pub product_type: Option<ProductType>,
}

impl CampaignBrief {
    /// Merge facts found in `text`. Later messages overwrite the client,
    /// industry and product type; goals accumulate.
    pub fn absorb(&mut self, text: &str) {
        if let Some(caps) = CLIENT_RE.captures(text) {
            self.client_name = Some(caps[1].trim().to_string());
        }
        if let Some((industry, _)) = INDUSTRY_RULES
            .iter()
            .filter_map(|(industry, re)| re.find(text).map(|m| (*industry, m.start())))
            .min_by_key(|(_, pos)| *pos)
        {
            self.industry = Some(industry);
        }
        for (goal, re) in GOAL_RULES.iter() {
            if re.is_match(text) && !self.kpi_goals.contains(goal) {
                self.kpi_goals.push(*goal);
            }
        }
        if SERVICE_RE.is_match(text) {
            self.product_type = Some(ProductType::Service);
        } else if PRODUCT_RE.is_match(text) {
            self.product_type = Some(ProductType::Product);
        }
    }

    pub fn from_text(text: &str) -> Self {
        let mut brief = Self::default();
        brief.absorb(text);
        brief
    }
}

/// Index into [`RESPONSES`] for a brief at the given 1-based user turn.
pub fn response_index(industry: Option<Industry>, user_turn: usize) -> usize {
    match industry {
        Some(Industry::Technology) => 0,
        Some(Industry::Fashion) => 1,
        Some(Industry::Automotive) => 2,
        Some(Industry::Finance) => 3,
        Some(Industry::Entertainment) => 4,
        _ => user_turn.saturating_sub(1) % RESPONSES.len(),
    }
}

// ── ChatScript ────────────────────────────────────────────────────────────────

/// Conversation state of the scripted assistant.
#[derive(Debug, Clone, Default)]
pub struct ChatScript {
    brief: CampaignBrief,
    user_turns: usize,
}

impl ChatScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn greeting(&self) -> ChatMessage {
        ChatMessage::ai(GREETING)
    }

    pub fn brief(&self) -> &CampaignBrief {
        &self.brief
    }

    pub fn user_turns(&self) -> usize {
        self.user_turns
    }

    /// Take one user message and return the assistant's timed replies.
    ///
    /// Blank input gets no reply and does not count as a turn.
    pub fn respond(&mut self, text: &str) -> Vec<ScriptedReply> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        self.user_turns += 1;
        self.brief.absorb(text);
        let index = response_index(self.brief.industry, self.user_turns);
        tracing::debug!(
            turn = self.user_turns,
            industry = ?self.brief.industry,
            response = index,
            "assistant reply chosen"
        );

        let mut replies = vec![ScriptedReply {
            delay: REPLY_DELAY,
            message: ChatMessage::ai(RESPONSES[index]),
        }];
        if self.user_turns >= 2 {
            replies.push(ScriptedReply {
                delay: DRAFT_READY_DELAY,
                message: ChatMessage::ai(DRAFT_READY),
            });
            replies.push(ScriptedReply {
                delay: ACTION_DELAY,
                message: ChatMessage::ai(format!("{}: {}", ACTION_MARKER, VIEW_PLAN_ACTION)),
            });
        }
        replies
    }

    /// Draft plan built from what the conversation revealed.
    ///
    /// Targets Germany with the recommended channels and regions, runs for
    /// three months from the first day of the month after `today`, and
    /// carries a seeded budget.
    pub fn propose_plan(&self, today: NaiveDate) -> MediaPlan {
        let brief = &self.brief;
        let mut plan = MediaPlan::new_draft();
        plan.client_name = brief
            .client_name
            .clone()
            .unwrap_or_else(|| "New Campaign".to_string());
        plan.product_type = brief.product_type;
        plan.industry = brief.industry;
        plan.kpi_goals = if brief.kpi_goals.is_empty() {
            vec![KpiGoal::BrandAwareness]
        } else {
            brief.kpi_goals.clone()
        };
        plan.country = Some(Country::Germany);
        plan.channels = recommended_channels(plan.industry, &plan.kpi_goals);
        plan.regions = recommended_regions(plan.industry, &plan.kpi_goals);

        let first_of_month = today.with_day(1).unwrap_or(today);
        let start = first_of_month
            .checked_add_months(Months::new(1))
            .unwrap_or(first_of_month);
        let end = start
            .checked_add_months(Months::new(PROPOSAL_MONTHS))
            .and_then(|d| d.pred_opt())
            .unwrap_or(start);
        plan.date_range = Some(DateRange { start, end });
        plan.budget = BudgetState::seed(
            &plan.channels,
            timeline::duration_months(plan.date_range.as_ref()),
        );
        plan.description = Some("Drafted with the media planning assistant.".to_string());
        plan
    }
}
