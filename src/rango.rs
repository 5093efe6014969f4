//! Rangos de celdas y letras de columna, como se escriben en la planilla.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::MigracionError;

/// Referencia de celda `<letras><fila>`.
static CELDA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([A-Z]+)(\d+)$").expect("valid cell reference regex"));

/// Desplazamiento entre la columna de nombres y la de pago en la plantilla
/// de muestra (B → I).
const DESPLAZAMIENTO_PAGO: u32 = 7;

/// Rango vertical de celdas de nombres, p. ej. `B3:B21`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangoNombres {
    /// Columna de los nombres (índice base 0).
    pub columna: u32,
    /// Primera fila del rango (base 1, como en la planilla).
    pub fila_inicio: u32,
    /// Última fila del rango (base 1).
    pub fila_fin: u32,
}

impl RangoNombres {
    /// Interpreta `B3:B21`, `B3-B21` o una celda suelta `B3`.
    ///
    /// Las filas invertidas se reordenan; cualquier otra desviación de la
    /// forma `<col><fila>` corta la corrida antes de procesar fila alguna.
    pub fn parsear(especificacion: &str) -> Result<Self, MigracionError> {
        let error = || MigracionError::Rango {
            valor: especificacion.to_string(),
        };
        let (inicio, fin) = partir_especificacion(especificacion);
        let (columna, fila_a) = referencia(inicio).ok_or_else(error)?;
        let (_, fila_b) = referencia(fin).ok_or_else(error)?;
        let (fila_inicio, fila_fin) = if fila_a > fila_b {
            (fila_b, fila_a)
        } else {
            (fila_a, fila_b)
        };
        Ok(Self {
            columna,
            fila_inicio,
            fila_fin,
        })
    }

    /// Filas del rango, en el orden de la planilla.
    pub const fn filas(&self) -> std::ops::RangeInclusive<u32> {
        self.fila_inicio..=self.fila_fin
    }
}

/// Columnas de pago de un lote.
///
/// Acepta un rango explícito (`J-L`, `J:L`) o una columna suelta (`J`);
/// sin especificación, deriva una única columna a partir de la de nombres
/// con el desplazamiento de la plantilla de muestra.
pub fn columnas_de_pago(
    especificacion: Option<&str>,
    columna_nombres: u32,
) -> Result<Vec<u32>, MigracionError> {
    let Some(espec) = especificacion else {
        return Ok(vec![columna_nombres + DESPLAZAMIENTO_PAGO]);
    };
    let error = || MigracionError::Columnas {
        valor: espec.to_string(),
    };
    let (inicio, fin) = partir_especificacion(espec);
    let inicio = indice_de_columna(inicio.trim()).ok_or_else(error)?;
    let fin = indice_de_columna(fin.trim()).ok_or_else(error)?;
    let (inicio, fin) = if inicio > fin { (fin, inicio) } else { (inicio, fin) };
    Ok((inicio..=fin).collect())
}

/// Descompone una referencia `B3` en columna (base 0) y fila (base 1).
pub fn referencia(celda: &str) -> Option<(u32, u32)> {
    let caps = CELDA_RE.captures(celda.trim())?;
    let columna = indice_de_columna(caps.get(1)?.as_str())?;
    let fila: u32 = caps.get(2)?.as_str().parse().ok()?;
    Some((columna, fila))
}

/// Índice de columna (base 0) para una letra o combinación de letras.
pub fn indice_de_columna(letras: &str) -> Option<u32> {
    if letras.is_empty() {
        return None;
    }
    let mut indice: u32 = 0;
    for ch in letras.chars() {
        let ch = ch.to_ascii_uppercase();
        if !ch.is_ascii_uppercase() {
            return None;
        }
        indice = indice.checked_mul(26)?.checked_add(ch as u32 - 'A' as u32 + 1)?;
    }
    Some(indice - 1)
}

/// Letras de columna para un índice base 0.
pub fn letra_de_columna(indice: u32) -> String {
    let mut letras = Vec::new();
    let mut resto = indice + 1;
    while resto > 0 {
        resto -= 1;
        letras.push(char::from(b'A' + u8::try_from(resto % 26).unwrap_or(0)));
        resto /= 26;
    }
    letras.iter().rev().collect()
}

fn partir_especificacion(espec: &str) -> (&str, &str) {
    espec
        .split_once(':')
        .or_else(|| espec.split_once('-'))
        .map_or((espec, espec), |(inicio, fin)| (inicio, fin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rango_con_dos_puntos() {
        let rango = RangoNombres::parsear("B3:B21").unwrap();
        assert_eq!(rango.columna, 1);
        assert_eq!(rango.fila_inicio, 3);
        assert_eq!(rango.fila_fin, 21);
    }

    #[test]
    fn rango_invertido_se_reordena() {
        let rango = RangoNombres::parsear("B21-B3").unwrap();
        assert_eq!((rango.fila_inicio, rango.fila_fin), (3, 21));
    }

    #[test]
    fn celda_suelta_es_rango_de_una_fila() {
        let rango = RangoNombres::parsear("C5").unwrap();
        assert_eq!((rango.columna, rango.fila_inicio, rango.fila_fin), (2, 5, 5));
    }

    #[test]
    fn rango_invalido_falla() {
        assert!(RangoNombres::parsear("3B:21").is_err());
        assert!(RangoNombres::parsear("").is_err());
    }

    #[test]
    fn letras_y_indices_son_inversos() {
        for (letras, indice) in [("A", 0), ("B", 1), ("Z", 25), ("AA", 26), ("AZ", 51)] {
            assert_eq!(indice_de_columna(letras), Some(indice));
            assert_eq!(letra_de_columna(indice), letras);
        }
    }

    #[test]
    fn columnas_explicitas_y_derivadas() {
        assert_eq!(columnas_de_pago(Some("J-L"), 1).unwrap(), vec![9, 10, 11]);
        assert_eq!(columnas_de_pago(Some("J"), 1).unwrap(), vec![9]);
        // Sin especificación: desplazamiento B -> I de la plantilla de muestra.
        assert_eq!(columnas_de_pago(None, 1).unwrap(), vec![8]);
        assert!(columnas_de_pago(Some("J3"), 1).is_err());
    }
}
