//! Built-in prompt bodies. Placeholders must be fields of `PromptContext`.

use indoc::indoc;

pub const FLOOD: &str = indoc! {"
    CONTEXTO TEMPORAL: {{ date_context }}
    REGIÓN DE ANÁLISIS: {{ region }}
    IDIOMA DE RESPUESTA: {{ language }}

    Como agente {{ agent_name }}, analiza la siguiente información sobre inundaciones en {{ region }} y genera un reporte de alerta agrícola específico:

    DATOS DE BÚSQUEDA:
    {{ data }}

    Genera un reporte que incluya:
    1. 🚨 PREDICCIONES ESPECÍFICAS DE INUNDACIÓN (fechas, lugares, niveles de riesgo)
    2. 🌾 IMPACTO DIRECTO EN AGRICULTURA (cultivos afectados, hectáreas en riesgo)
    3. ⚠️ ACCIONES INMEDIATAS RECOMENDADAS (medidas preventivas concretas)
    4. 📍 FUENTE: Análisis de noticias recientes

    Enfócate solo en información verificable y útil para agricultores de {{ region }}.
    Toda la respuesta debe estar en {{ language }}.
"};

pub const MARKET: &str = indoc! {"
    CONTEXTO TEMPORAL: {{ date_context }}
    REGIÓN DE ANÁLISIS: {{ region }}
    IDIOMA DE RESPUESTA: {{ language }}
    PRODUCTOS ANALIZADOS: {{ products }}

    Como agente especializado en inteligencia de mercados agrícolas, analiza la siguiente información sobre {{ region }}:

    DATOS DE MERCADO:
    {{ data }}

    Genera un reporte de inteligencia comercial que incluya:
    1. 💹 PRODUCTOS CON MAYOR POTENCIAL EN {{ region }} (precios al alza, demanda creciente)
    2. 🌍 OPORTUNIDADES DE EXPORTACIÓN DESDE {{ region }} (mercados internacionales, requisitos)
    3. 📊 ANÁLISIS DE PRECIOS POR PRODUCTO REGIONAL (tendencias, proyecciones)
    4. ⚠️ RIESGOS COMERCIALES IDENTIFICADOS (volatilidad, competencia local)
    5. 🎯 RECOMENDACIONES ESTRATÉGICAS (acciones concretas para productores locales)
    6. 📅 CRONOGRAMA DE OPORTUNIDADES (cuándo actuar considerando la estacionalidad)

    IMPORTANTE:
    - Enfócate en el período indicado en el contexto temporal
    - Incluye números específicos, porcentajes y fechas cuando estén disponibles
    - Toda la respuesta debe estar en {{ language }}
"};

pub const FERTILIZER: &str = indoc! {"
    CONTEXTO TEMPORAL: {{ date_context }}
    REGIÓN DE ANÁLISIS: {{ region }}

    Analiza la siguiente información sobre precios de fertilizantes en {{ region }} y genera un reporte de alerta económica agrícola:

    DATOS DE BÚSQUEDA:
    {{ data }}

    Genera un reporte que incluya:
    1. 📈 PREDICCIONES DE PRECIOS ESPECÍFICAS (productos, porcentajes de aumento, fechas)
    2. 💰 FACTORES QUE IMPULSAN LOS CAMBIOS (causas económicas, importaciones)
    3. 💡 ESTRATEGIAS RECOMENDADAS PARA AGRICULTORES (acciones concretas)
    4. 📍 FUENTE: Análisis de mercado y noticias comerciales

    Sé específico con números, fechas y productos cuando estén disponibles.
    Responde en {{ language }}.
"};

pub const DROUGHT: &str = indoc! {"
    CONTEXTO TEMPORAL: {{ date_context }}
    REGIÓN DE ANÁLISIS: {{ region }}

    Analiza la siguiente información sobre sequía y disponibilidad de agua en {{ region }} y genera un reporte de alerta agrícola:

    DATOS DE BÚSQUEDA:
    {{ data }}

    Genera un reporte que incluya:
    1. ☀️ ZONAS Y CULTIVOS EN RIESGO POR SEQUÍA
    2. 💧 RESTRICCIONES DE RIEGO Y ESTADO DE RESERVAS
    3. 🌱 PRÁCTICAS RECOMENDADAS PARA CONSERVAR AGUA Y COSECHA
    4. 📍 FUENTE: Análisis de noticias recientes

    Responde en {{ language }}.
"};

pub const PEST: &str = indoc! {"
    CONTEXTO TEMPORAL: {{ date_context }}
    REGIÓN DE ANÁLISIS: {{ region }}

    Analiza la siguiente información sobre plagas y enfermedades de cultivos en {{ region }} y genera un reporte fitosanitario:

    DATOS DE BÚSQUEDA:
    {{ data }}

    Genera un reporte que incluya:
    1. 🐛 BROTES ACTIVOS (plaga o enfermedad, cultivos y zonas afectadas)
    2. 🔬 NIVEL DE RIESGO Y VELOCIDAD DE PROPAGACIÓN
    3. 🛡️ MEDIDAS DE CONTROL RECOMENDADAS (incluye manejo integrado)
    4. 📍 FUENTE: Análisis de noticias recientes

    Responde en {{ language }}.
"};

pub const INFRASTRUCTURE: &str = indoc! {"
    CONTEXTO TEMPORAL: {{ date_context }}
    REGIÓN DE ANÁLISIS: {{ region }}

    Analiza la siguiente información sobre transporte e infraestructura en {{ region }} y su efecto en la cadena agrícola:

    DATOS DE BÚSQUEDA:
    {{ data }}

    Genera un reporte que incluya:
    1. 🚧 CIERRES DE VÍAS, PAROS Y DAÑOS REPORTADOS
    2. 🚚 IMPACTO EN TRANSPORTE DE INSUMOS Y COSECHAS
    3. 🧭 RUTAS O ACCIONES ALTERNATIVAS PARA PRODUCTORES
    4. 📍 FUENTE: Análisis de noticias recientes

    Responde en {{ language }}.
"};

pub const FLOOD_RISK: &str = indoc! {"
    {{ date_context }}
    Región: {{ region }}

    Basándote en esta información: {{ data }}

    Determina el NIVEL DE RIESGO de inundación para agricultura en {{ region }}.

    RESPONDE EN ESTE FORMATO:

    NIVEL DE RIESGO DE INUNDACIÓN - {{ region | upper }}
    RIESGO: [BAJO/MEDIO/ALTO/CRÍTICO]

    JUSTIFICACIÓN:
    [Explicación basada en datos oficiales]

    RECOMENDACIÓN INMEDIATA:
    [Acción específica para agricultores]

    Responde en {{ language }}.
"};

pub const MARKET_OPPORTUNITIES: &str = indoc! {"
    REGIÓN: {{ region }}
    FECHA: {{ date_context }}

    Identifica las TOP {{ limit }} OPORTUNIDADES COMERCIALES más prometedoras para agricultores en {{ region }}:

    DATOS: {{ data }}

    Para cada oportunidad incluye:
    - Producto específico relevante para {{ region }}
    - Razón de la oportunidad
    - Acción recomendada para agricultores
    - Ventana de tiempo considerando la estacionalidad

    Responde en {{ language }}. Sé conciso y específico.
"};
