//! Fixed query lists per monitoring topic.

use crate::locale::Region;

pub fn topic_queries(topic: &str, region: &Region) -> Vec<String> {
    let r = region.search;
    let mut queries: Vec<String> = match topic.to_lowercase().as_str() {
        "inundaciones" => vec![
            format!("flood alert agriculture {} crops affected latest news", r),
            format!("inundación agricultura {} cultivos perdidos noticias recientes", r),
            format!("\"emergency flood\" {} agriculture evacuation news", r),
            format!("\"alerta inundación\" {} agricultura hectáreas afectadas", r),
            format!("flooding forecast {} agricultural impact prediction", r),
            format!("\"se espera inundación\" {} agricultura próximos días", r),
        ],
        "fertilizantes" => vec![
            format!("fertilizer price increase {} agriculture news", r),
            format!("\"precio fertilizante sube\" {} agricultores noticias", r),
            format!("\"fertilizer shortage\" {} agricultural production impact", r),
            format!("\"escasez fertilizante\" {} producción agrícola", r),
            format!("\"urea price\" {} agriculture import cost", r),
            format!("inflación insumos agrícolas {} fertilizante", r),
        ],
        "sequia" => vec![
            format!("drought emergency {} agriculture water crisis", r),
            format!("\"sequía severa\" {} cultivos agricultura", r),
            format!("\"water shortage\" {} irrigation agriculture restriction", r),
            format!("\"escasez agua\" {} agricultura riego prohibición", r),
            format!("\"crop loss drought\" {} agricultural emergency", r),
            format!("\"pérdida cosecha sequía\" {} hectáreas afectadas", r),
        ],
        "plagas" => vec![
            format!("pest outbreak {} agriculture crop disease", r),
            format!("\"brote plaga\" {} cultivos agricultura fitosanitaria", r),
            format!("\"new plant disease\" {} agriculture pest control", r),
            format!("\"nueva enfermedad plantas\" {} agricultura", r),
            format!("\"insect invasion\" {} agriculture urgent control", r),
            format!("\"resistencia pesticida\" {} manejo plagas", r),
        ],
        "mercado" => vec![
            format!("agricultural prices rising {} export market", r),
            format!("\"precios agrícolas suben\" {} mercado exportación", r),
            format!("\"international demand\" {} agricultural export opportunity", r),
            format!("\"demanda internacional\" {} exportación agrícola", r),
            format!("commodity prices {} agriculture market forecast", r),
            format!("\"nuevos mercados\" exportación {} agricultura", r),
        ],
        "infraestructura" => vec![
            format!("road closure {} agricultural transport logistics", r),
            format!("\"cierre carretera\" {} transporte agrícola", r),
            format!("\"infrastructure damage\" {} agriculture supply chain", r),
            format!("\"daño infraestructura\" {} agricultura transporte", r),
            format!("\"transport strike\" {} agricultural products", r),
            format!("\"paro transportadores\" {} productos agrícolas", r),
        ],
        _ => Vec::new(),
    };

    if region.is_peru() {
        match topic.to_lowercase().as_str() {
            "clima" => queries.extend(strings(PERU_CLIMATE)),
            "mercado" => queries.extend(strings(PERU_ECONOMY)),
            _ => {}
        }
    }

    if queries.is_empty() {
        queries = generic_queries(topic, r);
    }

    queries
}

const PERU_CLIMATE: &[&str] = &[
    "clima agricultura Perú sierra costa selva pronóstico",
    "\"El Niño\" Perú agricultura impacto cultivos",
    "\"La Niña\" Perú agricultura sequía inundación",
    "SENAMHI Perú alerta agricultura clima",
    "\"cambio climático\" Perú agricultura adaptación",
];

const PERU_ECONOMY: &[&str] = &[
    "precio productos agrícolas Perú mercado mayorista",
    "exportación agrícola Perú estadísticas MINAGRI",
    "\"agricultura peruana\" mercado internacional competitividad",
    "\"sector agrario Perú\" inversión desarrollo",
    "\"seguridad alimentaria\" Perú producción agrícola",
];

const PERU_GENERAL: &[&str] = &[
    "agricultura Perú MINAGRI estadísticas producción",
    "sector agrario Perú desarrollo rural políticas",
    "\"agricultura familiar\" Perú pequeños productores",
    "\"seguridad alimentaria\" Perú producción nacional",
    "\"cadenas productivas\" agricultura Perú competitividad",
];

const PERU_SIERRA: &[&str] = &[
    "agricultura sierra Perú papa quinua cultivos andinos",
    "\"agricultura de montaña\" Perú adaptación clima",
    "\"cultivos nativos\" Perú sierra biodiversidad",
    "\"terrazas agrícolas\" Perú sierra conservación",
];

const PERU_COSTA: &[&str] = &[
    "agricultura costa Perú espárrago uva exportación",
    "\"agricultura tecnificada\" costa Perú riego",
    "\"valles costeros\" Perú producción agrícola",
    "\"agricultura de exportación\" costa Perú",
];

const PERU_SELVA: &[&str] = &[
    "agricultura selva Perú café cacao amazonia",
    "\"agricultura sostenible\" selva Perú bosques",
    "\"cultivos tropicales\" selva Perú biodiversidad",
    "\"agricultura familiar\" amazonia Perú",
];

/// Queries about Peruvian agriculture in one natural zone (`sierra`, `costa`,
/// `selva`). Anything else gets the national `general` list.
pub fn peru_specific_queries(zone: &str) -> Vec<String> {
    let list = match zone.trim().to_lowercase().as_str() {
        "sierra" => PERU_SIERRA,
        "costa" => PERU_COSTA,
        "selva" => PERU_SELVA,
        _ => PERU_GENERAL,
    };
    strings(list)
}

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|q| q.to_string()).collect()
}

fn generic_queries(topic: &str, r: &str) -> Vec<String> {
    vec![
        format!("{} agriculture {} news latest", topic, r),
        format!("{} agricultura {} noticias recientes", topic, r),
        format!("agricultural {} {} impact forecast", topic, r),
    ]
}
