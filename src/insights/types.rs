//! Insight records and report types.

use serde::{Deserialize, Serialize};

/// What kind of advice an insight carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Strength,
    Weakness,
    Tip,
    Warning,
}

impl InsightCategory {
    pub const ALL: [InsightCategory; 4] = [
        InsightCategory::Strength,
        InsightCategory::Weakness,
        InsightCategory::Tip,
        InsightCategory::Warning,
    ];
}

impl std::fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsightCategory::Strength => write!(f, "strength"),
            InsightCategory::Weakness => write!(f, "weakness"),
            InsightCategory::Tip => write!(f, "tip"),
            InsightCategory::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// A single piece of advice produced by one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub category: InsightCategory,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    pub confidence: Confidence,
    pub data_points: Vec<String>,
}

impl Insight {
    pub(crate) fn new(
        category: InsightCategory,
        title: impl Into<String>,
        description: impl Into<String>,
        confidence: Confidence,
    ) -> Self {
        Self {
            category,
            title: title.into(),
            description: description.into(),
            metric: None,
            action: None,
            confidence,
            data_points: Vec::new(),
        }
    }

    pub(crate) fn metric(mut self, metric: impl Into<String>) -> Self {
        self.metric = Some(metric.into());
        self
    }

    pub(crate) fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub(crate) fn data_point(mut self, point: impl Into<String>) -> Self {
        self.data_points.push(point.into());
        self
    }
}

/// Headline view over a set of insights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSummary {
    /// 0 to 100.
    pub overall_rating: u32,
    pub main_strength: String,
    pub main_weakness: String,
    pub quick_tip: String,
}

/// Insights for one player, as cached and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsReport {
    /// Unix seconds.
    pub generated_at: i64,
    pub insights: Vec<Insight>,
    pub summary: InsightSummary,
}

/// Insights split by category, each in rule order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightGroups {
    pub strength: Vec<Insight>,
    pub weakness: Vec<Insight>,
    pub tip: Vec<Insight>,
    pub warning: Vec<Insight>,
}

impl InsightGroups {
    pub fn get(&self, category: InsightCategory) -> &[Insight] {
        match category {
            InsightCategory::Strength => &self.strength,
            InsightCategory::Weakness => &self.weakness,
            InsightCategory::Tip => &self.tip,
            InsightCategory::Warning => &self.warning,
        }
    }
}
