//! Template video entities and generation cost rules.

use serde::{Deserialize, Serialize};

/// Templates billed at the premium rate. This set is fixed in the product,
/// independent of what the listing reports.
pub const PREMIUM_TEMPLATES: [&str; 6] = ["dance1", "dance2", "dance3", "kiss", "hug", "money"];

/// Coin cost of a premium-template generation
pub const PREMIUM_TEMPLATE_COST: u32 = 55;

/// Coin cost of every other generation (basic template, image+prompt, text-only)
pub const STANDARD_GENERATION_COST: u32 = 30;

/// Template pricing tier reported by the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Basic,
    Premium,
}

/// A pre-recorded reference clip combined with a user image to drive generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateVideo {
    pub id: String,
    pub name: String,
    pub video_url: String,
    pub category: TemplateCategory,
    #[serde(default)]
    pub description: String,
}

/// Whether a template id belongs to the fixed premium set
pub fn is_premium_template(template_id: &str) -> bool {
    PREMIUM_TEMPLATES.contains(&template_id)
}

/// Coin cost of generating with the given template
pub fn template_cost(template_id: &str) -> u32 {
    if is_premium_template(template_id) {
        PREMIUM_TEMPLATE_COST
    } else {
        STANDARD_GENERATION_COST
    }
}
