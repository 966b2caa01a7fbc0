use serde::Serialize;
use strum_macros::{Display, EnumIter, IntoStaticStr};

use super::templates;
use crate::locale::Region;

/// The closed set of monitoring tasks an agent can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, IntoStaticStr)]
pub enum AgentKind {
    #[strum(serialize = "PREDICTOR_INUNDACIONES")]
    Flood,
    #[strum(serialize = "INTELIGENCIA_MERCADOS")]
    Market,
    #[strum(serialize = "MONITOR_FERTILIZANTES")]
    Fertilizer,
    #[strum(serialize = "MONITOR_SEQUIA")]
    Drought,
    #[strum(serialize = "VIGILANCIA_PLAGAS")]
    Pest,
    #[strum(serialize = "MONITOR_INFRAESTRUCTURA")]
    Infrastructure,
}

impl AgentKind {
    pub fn agent_name(&self) -> &'static str {
        (*self).into()
    }

    pub fn task(&self) -> &'static str {
        match self {
            Self::Flood => "flood_prediction",
            Self::Market => "market_intelligence",
            Self::Fertilizer => "fertilizer_prices",
            Self::Drought => "drought_monitoring",
            Self::Pest => "pest_surveillance",
            Self::Infrastructure => "infrastructure_monitoring",
        }
    }

    /// Key into the search query catalogue.
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Flood => "inundaciones",
            Self::Market => "mercado",
            Self::Fertilizer => "fertilizantes",
            Self::Drought => "sequia",
            Self::Pest => "plagas",
            Self::Infrastructure => "infraestructura",
        }
    }

    /// Type written to the alert log, `<agent name>_<suffix>`.
    pub fn alert_type(&self) -> String {
        let suffix = match self {
            Self::Flood => "ANALISIS_INUNDACIONES",
            Self::Market => "INTELIGENCIA_MERCADOS",
            Self::Fertilizer => "ALERTA_FERTILIZANTES",
            Self::Drought => "ALERTA_SEQUIA",
            Self::Pest => "ALERTA_PLAGAS",
            Self::Infrastructure => "ALERTA_INFRAESTRUCTURA",
        };
        format!("{}_{}", self.agent_name(), suffix)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Flood => "🌊 Monitorea alertas de inundación, evalúa el riesgo para cultivos y recomienda medidas preventivas",
            Self::Market => "📈 Monitorea precios agrícolas, identifica oportunidades de exportación y recomienda estrategias comerciales",
            Self::Fertilizer => "🧪 Sigue precios y escasez de fertilizantes y su impacto en costos de producción",
            Self::Drought => "☀️ Vigila sequías, restricciones de riego y pérdidas de cosecha",
            Self::Pest => "🐛 Detecta brotes de plagas y enfermedades de cultivos",
            Self::Infrastructure => "🚧 Reporta cierres de vías y daños que afectan la logística agrícola",
        }
    }

    pub(crate) fn template(&self) -> &'static str {
        match self {
            Self::Flood => templates::FLOOD,
            Self::Market => templates::MARKET,
            Self::Fertilizer => templates::FERTILIZER,
            Self::Drought => templates::DROUGHT,
            Self::Pest => templates::PEST,
            Self::Infrastructure => templates::INFRASTRUCTURE,
        }
    }

    pub(crate) fn brief_template(&self) -> Option<&'static str> {
        match self {
            Self::Flood => Some(templates::FLOOD_RISK),
            Self::Market => Some(templates::MARKET_OPPORTUNITIES),
            _ => None,
        }
    }

    /// The single search behind a quick brief.
    pub(crate) fn brief_query(&self, region: &Region, date_text: &str) -> Option<String> {
        match self {
            Self::Flood => Some(format!(
                "alerta inundación {} {} agricultura",
                region.search, date_text
            )),
            Self::Market => Some(format!(
                "mejores precios agricultura {} exportación oportunidades",
                region.search
            )),
            _ => None,
        }
    }

    /// Accepts the agent name or the task id, in any case.
    pub fn parse(input: &str) -> Option<Self> {
        use strum::IntoEnumIterator;

        let wanted = input.trim();
        Self::iter().find(|kind| {
            kind.agent_name().eq_ignore_ascii_case(wanted) || kind.task().eq_ignore_ascii_case(wanted)
        })
    }
}
