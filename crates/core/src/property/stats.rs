use serde::Serialize;

/// Numbers shown on the manager dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerStats {
    pub views: i64,
    pub whatsapp_clicks: i64,
    pub active_listings: i64,
    /// WhatsApp clicks per view, as a percentage rounded to one decimal.
    pub conversion_rate: f64,
}

impl ManagerStats {
    pub fn new(views: i64, whatsapp_clicks: i64, active_listings: i64) -> Self {
        let conversion_rate = if views > 0 {
            (whatsapp_clicks as f64 * 1000.0 / views as f64).round() / 10.0
        } else {
            0.0
        };
        Self {
            views,
            whatsapp_clicks,
            active_listings,
            conversion_rate,
        }
    }
}
