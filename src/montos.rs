//! Conversión de valores de celda a montos monetarios.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::tipos::{Celda, Money, PoliticaMontos};

/// Tokens que aparecen en las celdas de pago en lugar de un monto.
const TOKENS_NO_MONETARIOS: [&str; 7] = ["xx", "x", "beca", "pendiente", "na", "n/a", "-"];

/// Coma seguida de uno o dos dígitos al final: coma decimal.
static COMA_DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\d{1,2}$").expect("valid decimal-comma regex"));

/// Convierte el valor de una celda en un monto monetario.
///
/// Las celdas numéricas pasan directo; el texto admite símbolo de moneda y
/// separadores de miles o decimales en cualquiera de las dos convenciones
/// (`Q1.234,56`, `1,234.56`). La política `Estricta` además rechaza los
/// tokens no monetarios conocidos (`BECA`, `PENDIENTE`, `XX`, …), los
/// valores con `/` (fechas anotadas en la columna equivocada) y todo monto
/// no positivo.
pub fn parsear_monto(celda: &Celda, politica: PoliticaMontos) -> Option<Money> {
    match celda {
        Celda::Vacia => None,
        Celda::Numero(valor) => aplicar_politica(Decimal::from_f64(*valor)?, politica),
        Celda::Texto(texto) => parsear_monto_texto(texto, politica),
    }
}

fn parsear_monto_texto(texto: &str, politica: PoliticaMontos) -> Option<Money> {
    let recortado = texto.trim();
    if recortado.is_empty() {
        return None;
    }
    if politica == PoliticaMontos::Estricta {
        let minusculas = recortado.to_lowercase();
        if minusculas.contains('/') || TOKENS_NO_MONETARIOS.contains(&minusculas.as_str()) {
            return None;
        }
    }

    let cifra: String = recortado
        .chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, ',' | '.' | '-'))
        .collect();
    let cifra = normalizar_separadores(&cifra);
    if !cifra.chars().any(|ch| ch.is_ascii_digit()) {
        return None;
    }

    aplicar_politica(Decimal::from_str(&cifra).ok()?, politica)
}

/// Deja el punto como único separador decimal.
///
/// Con coma y punto presentes, el que aparece último es el decimal y el otro
/// se descarta como separador de miles. Una coma sola es decimal únicamente
/// si la siguen uno o dos dígitos al final de la cifra.
fn normalizar_separadores(cifra: &str) -> String {
    match (cifra.rfind(','), cifra.rfind('.')) {
        (Some(coma), Some(punto)) if coma > punto => cifra.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cifra.replace(',', ""),
        (Some(_), None) => {
            if COMA_DECIMAL_RE.is_match(cifra) {
                cifra.replace(',', ".")
            } else {
                cifra.replace(',', "")
            }
        }
        _ => cifra.to_string(),
    }
}

fn aplicar_politica(monto: Money, politica: PoliticaMontos) -> Option<Money> {
    match politica {
        PoliticaMontos::Permisiva => Some(monto),
        PoliticaMontos::Estricta => (monto > Money::ZERO).then_some(monto),
    }
}
