//! Static region and language tables used to parameterize agent prompts.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Language {
    #[strum(serialize = "ESPAÑOL")]
    Espanol,
    #[strum(serialize = "ENGLISH")]
    English,
    #[strum(serialize = "FRANÇAIS")]
    Francais,
    #[strum(serialize = "PORTUGUÊS")]
    Portugues,
    #[strum(serialize = "QUECHUA")]
    Quechua,
    #[strum(serialize = "DEUTSCH")]
    Deutsch,
    #[strum(serialize = "ITALIANO")]
    Italiano,
}

const ES_MONTHS: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
    "octubre", "noviembre", "diciembre",
];
const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const FR_MONTHS: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
    "octobre", "novembre", "décembre",
];
const PT_MONTHS: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

impl Language {
    /// Case-insensitive parse, accepting unaccented spellings.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_uppercase().as_str() {
            "ESPAÑOL" | "ESPANOL" | "SPANISH" | "ES" => Some(Self::Espanol),
            "ENGLISH" | "INGLÉS" | "INGLES" | "EN" => Some(Self::English),
            "FRANÇAIS" | "FRANCAIS" | "FRENCH" | "FR" => Some(Self::Francais),
            "PORTUGUÊS" | "PORTUGUES" | "PORTUGUESE" | "PT" => Some(Self::Portugues),
            "QUECHUA" | "QU" => Some(Self::Quechua),
            "DEUTSCH" | "GERMAN" | "DE" => Some(Self::Deutsch),
            "ITALIANO" | "ITALIAN" | "IT" => Some(Self::Italiano),
            _ => None,
        }
    }

    /// Missing or unknown input falls back to Spanish.
    pub fn resolve(input: Option<&str>) -> Self {
        input.and_then(Self::parse).unwrap_or(Self::Espanol)
    }

    /// System message instructing the model to answer only in this language.
    pub fn system_prompt(&self) -> &'static str {
        match self {
            Self::Espanol => "HABLA ÚNICAMENTE EN ESPAÑOL. Eres un asistente de inteligencia agrícola especializado en analizar condiciones agrícolas, patrones climáticos, tendencias de mercado y riesgos agrícolas. Proporciona información específica y accionable para agricultores.",
            Self::English => "SPEAK ONLY IN ENGLISH. You are an agricultural intelligence assistant specialized in analyzing farming conditions, weather patterns, market trends, and agricultural risks. Provide specific, actionable information for farmers.",
            Self::Francais => "PARLE UNIQUEMENT EN FRANÇAIS. Tu es un assistant d'intelligence agricole spécialisé dans l'analyse des conditions agricoles, des modèles météorologiques, des tendances du marché et des risques agricoles. Fournis des informations spécifiques et exploitables pour les agriculteurs.",
            Self::Portugues => "FALE APENAS EM PORTUGUÊS. Você é um assistente de inteligência agrícola especializado em analisar condições agrícolas, padrões climáticos, tendências de mercado e riscos agrícolas. Forneça informações específicas e acionáveis para agricultores.",
            Self::Quechua => "QUECHUALLAPI RIMAYLLAM. Qam kanki chakra yachay yanapakuq, chakra llamkaykunata, pacha tikraykunata, qhatuy tikraykunata, chakra pisiyaykunatapas t'aqwiykuchaq. Chakra llamkaqkunapaq hunt'asqa, ruwanapaq yachaykunata quy. Tukuy kutichiykunata quechuallapi ruway.",
            Self::Deutsch => "SPRICH NUR AUF DEUTSCH. Du bist ein landwirtschaftlicher Intelligenz-Assistent, der sich auf die Analyse von landwirtschaftlichen Bedingungen, Wettermustern, Markttrends und landwirtschaftlichen Risiken spezialisiert hat.",
            Self::Italiano => "PARLA SOLO IN ITALIANO. Sei un assistente di intelligenza agricola specializzato nell'analisi delle condizioni agricole, dei modelli meteorologici, delle tendenze di mercato e dei rischi agricoli.",
        }
    }

    fn months(&self) -> &'static [&'static str; 12] {
        match self {
            Self::English => &EN_MONTHS,
            Self::Francais => &FR_MONTHS,
            Self::Portugues => &PT_MONTHS,
            _ => &ES_MONTHS,
        }
    }

    /// Today's date written out, e.g. `19 de octubre de 2026`.
    pub fn date_text(&self, date: NaiveDate) -> String {
        let month = self.months()[date.month0() as usize];
        let (day, year) = (date.day(), date.year());
        match self {
            Self::English => format!("{} {}, {}", month, day, year),
            Self::Francais => format!("{} {} {}", day, month, year),
            _ => format!("{} de {} de {}", day, month, year),
        }
    }

    /// Lookback window ending on `date`. Only Spanish and English have range wording.
    /// A window reaching past the earliest representable date starts there.
    pub fn date_range_text(&self, date: NaiveDate, days_back: u32) -> String {
        let start = date
            .checked_sub_days(Days::new(u64::from(days_back)))
            .unwrap_or(NaiveDate::MIN);
        match self {
            Self::English => format!(
                "from {} {} to {} {}, {}",
                EN_MONTHS[start.month0() as usize],
                start.day(),
                EN_MONTHS[date.month0() as usize],
                date.day(),
                date.year()
            ),
            _ => format!(
                "desde {} de {} hasta {} de {} de {}",
                start.day(),
                ES_MONTHS[start.month0() as usize],
                date.day(),
                ES_MONTHS[date.month0() as usize],
                date.year()
            ),
        }
    }

    /// Full temporal context pasted at the top of analysis prompts.
    pub fn date_context(&self, date: NaiveDate, days_back: u32) -> String {
        let current = self.date_text(date);
        let range = self.date_range_text(date, days_back);
        match self {
            Self::English => format!("Current date: {}. Analysis for the period {}", current, range),
            Self::Francais => format!("Date actuelle: {}. Analyse pour la période {}", current, range),
            Self::Portugues => format!("Data atual: {}. Análise para o período {}", current, range),
            _ => format!("Fecha actual: {}. Análisis para el periodo {}", current, range),
        }
    }
}

/// A known region: what we show to people and what we type into search engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub display: &'static str,
    pub search: &'static str,
}

// (lower-case key, display name, search name)
const REGIONS: &[(&str, &str, &str)] = &[
    ("perú", "Perú", "Peru"),
    ("peru", "Perú", "Peru"),
    ("colombia", "Colombia", "Colombia"),
    ("méxico", "México", "Mexico"),
    ("mexico", "México", "Mexico"),
    ("argentina", "Argentina", "Argentina"),
    ("brasil", "Brasil", "Brazil"),
    ("brazil", "Brasil", "Brazil"),
    ("chile", "Chile", "Chile"),
    ("ecuador", "Ecuador", "Ecuador"),
    ("bolivia", "Bolivia", "Bolivia"),
    ("venezuela", "Venezuela", "Venezuela"),
    ("paraguay", "Paraguay", "Paraguay"),
    ("uruguay", "Uruguay", "Uruguay"),
    ("guatemala", "Guatemala", "Guatemala"),
    ("el salvador", "El Salvador", "El Salvador"),
    ("honduras", "Honduras", "Honduras"),
    ("nicaragua", "Nicaragua", "Nicaragua"),
    ("costa rica", "Costa Rica", "Costa Rica"),
    ("panamá", "Panamá", "Panama"),
    ("panama", "Panamá", "Panama"),
    ("estados unidos", "Estados Unidos", "United States"),
    ("usa", "Estados Unidos", "United States"),
    ("united states", "Estados Unidos", "United States"),
    ("canadá", "Canadá", "Canada"),
    ("canada", "Canadá", "Canada"),
    ("españa", "España", "Spain"),
    ("spain", "España", "Spain"),
    ("francia", "Francia", "France"),
    ("france", "Francia", "France"),
    ("italia", "Italia", "Italy"),
    ("italy", "Italia", "Italy"),
    ("alemania", "Alemania", "Germany"),
    ("germany", "Alemania", "Germany"),
    ("portugal", "Portugal", "Portugal"),
    ("reino unido", "Reino Unido", "United Kingdom"),
    ("uk", "Reino Unido", "United Kingdom"),
    ("china", "China", "China"),
    ("india", "India", "India"),
    ("japón", "Japón", "Japan"),
    ("japan", "Japón", "Japan"),
    ("corea del sur", "Corea del Sur", "South Korea"),
    ("south korea", "Corea del Sur", "South Korea"),
    ("vietnam", "Vietnam", "Vietnam"),
    ("indonesia", "Indonesia", "Indonesia"),
    ("sudáfrica", "Sudáfrica", "South Africa"),
    ("south africa", "Sudáfrica", "South Africa"),
    ("kenia", "Kenia", "Kenya"),
    ("kenya", "Kenia", "Kenya"),
    ("nigeria", "Nigeria", "Nigeria"),
    ("australia", "Australia", "Australia"),
    ("nueva zelanda", "Nueva Zelanda", "New Zealand"),
    ("new zealand", "Nueva Zelanda", "New Zealand"),
];

const REGIONAL_PRODUCTS: &[(&str, &[&str])] = &[
    ("Perú", &["papa", "quinua", "café", "cacao", "maíz"]),
    ("Colombia", &["café", "cacao", "arroz", "maíz", "papa"]),
    ("México", &["maíz", "frijol", "café", "aguacate", "tomate"]),
    ("Argentina", &["soja", "trigo", "maíz", "carne", "leche"]),
    ("Brasil", &["soja", "café", "azúcar", "maíz", "algodón"]),
    ("Chile", &["uvas", "manzanas", "salmón", "vino", "cerezas"]),
    ("Ecuador", &["banano", "cacao", "café", "flores", "camarón"]),
    ("Bolivia", &["quinua", "soja", "café", "castaña", "papa"]),
];

const GENERIC_PRODUCTS: &[&str] = &["café", "cereales", "frutas", "vegetales"];

impl Region {
    pub fn lookup(input: &str) -> Option<Self> {
        let key = input.trim().to_lowercase();
        REGIONS
            .iter()
            .find(|(k, _, _)| *k == key.as_str())
            .map(|&(_, display, search)| Region { display, search })
    }

    /// Resolve user input against the table, falling back to `default`
    /// (and to Perú if the default itself is unknown).
    pub fn resolve(input: Option<&str>, default: &str) -> Self {
        input
            .and_then(Self::lookup)
            .or_else(|| Self::lookup(default))
            .unwrap_or(Region {
                display: "Perú",
                search: "Peru",
            })
    }

    pub fn is_peru(&self) -> bool {
        self.search == "Peru"
    }

    /// Default products the market agent prices for this region.
    pub fn products(&self) -> Vec<String> {
        REGIONAL_PRODUCTS
            .iter()
            .find(|(name, _)| *name == self.display)
            .map(|(_, products)| *products)
            .unwrap_or(GENERIC_PRODUCTS)
            .iter()
            .map(|p| p.to_string())
            .collect()
    }
}
