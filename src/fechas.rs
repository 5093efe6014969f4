//! Extracción de fechas de pago desde comentarios de celda.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::texto::quitar_acentos;
use crate::tipos::FechaPago;

/// Meses del año en español, ya sin acentos y en mayúsculas.
const MESES: [&str; 12] = [
    "ENERO",
    "FEBRERO",
    "MARZO",
    "ABRIL",
    "MAYO",
    "JUNIO",
    "JULIO",
    "AGOSTO",
    "SEPTIEMBRE",
    "OCTUBRE",
    "NOVIEMBRE",
    "DICIEMBRE",
];

/// `13 NOVIEMBRE 2024`: día, nombre de mes y año.
static DIA_MES_ANIO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<dia>[0-3]?\d)\s+(?P<mes>[A-ZÁÉÍÓÚÑ]+)\s+(?P<anio>\d{4})")
        .expect("valid day-month-year regex")
});

/// `15/03/2024` o `15-03-2024`: fecha numérica.
static FECHA_NUMERICA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<dia>[0-3]?\d)[/-](?P<mes>[01]?\d)[/-](?P<anio>\d{4})")
        .expect("valid numeric date regex")
});

/// Primer número de uno o dos dígitos dentro de un encabezado.
static NUMERO_MES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}").expect("valid month number regex"));

/// Número de mes (1-12) para un nombre de mes ya normalizado.
pub fn mes_desde_nombre(palabra: &str) -> Option<u32> {
    MESES
        .iter()
        .position(|mes| *mes == palabra)
        .and_then(|indice| u32::try_from(indice + 1).ok())
}

/// Busca una fecha de pago dentro del texto de un comentario.
///
/// Prefiere `día nombre-de-mes año`; si la palabra de mes no está en la
/// tabla, conserva el fragmento encontrado como [`FechaPago::Cruda`] en vez
/// de descartarlo. Como segunda opción acepta `dd/mm/aaaa` o `dd-mm-aaaa`.
/// Sin coincidencias, o con una fecha calendario imposible, devuelve `None`.
pub fn extraer_fecha(comentario: &str) -> Option<FechaPago> {
    if comentario.is_empty() {
        return None;
    }
    let normalizado = quitar_acentos(comentario).to_uppercase();

    if let Some(caps) = DIA_MES_ANIO_RE.captures(&normalizado) {
        let dia: u32 = caps["dia"].parse().ok()?;
        let anio: i32 = caps["anio"].parse().ok()?;
        let palabra_mes = &caps["mes"];
        return match mes_desde_nombre(palabra_mes) {
            Some(mes) => NaiveDate::from_ymd_opt(anio, mes, dia).map(FechaPago::Iso),
            None => Some(FechaPago::Cruda(format!("{dia:02} {palabra_mes} {anio}"))),
        };
    }

    if let Some(caps) = FECHA_NUMERICA_RE.captures(&normalizado) {
        let dia: u32 = caps["dia"].parse().ok()?;
        let mes: u32 = caps["mes"].parse().ok()?;
        let anio: i32 = caps["anio"].parse().ok()?;
        return NaiveDate::from_ymd_opt(anio, mes, dia).map(FechaPago::Iso);
    }

    None
}

/// Primer día del mes de respaldo, para comentarios sin fecha.
pub fn fecha_de_respaldo(mes: u32, anio: i32) -> Option<FechaPago> {
    NaiveDate::from_ymd_opt(anio, mes, 1).map(FechaPago::Iso)
}

/// Mes indicado por el encabezado de una columna de pago.
///
/// La primera palabra se coteja contra la tabla de meses; si no es un nombre
/// de mes se acepta el primer número de uno o dos dígitos del encabezado.
pub fn mes_desde_encabezado(encabezado: &str) -> Option<u32> {
    let normalizado = quitar_acentos(encabezado).to_uppercase();
    let primera = normalizado.split_whitespace().next()?;
    mes_desde_nombre(primera)
        .or_else(|| NUMERO_MES_RE.find(&normalizado).and_then(|m| m.as_str().parse().ok()))
}
