//! Carga y renderizado de la plantilla de `INSERT` de pagos.
//!
//! La plantilla es una sentencia escrita a mano con comentarios en línea que
//! sirven de anclas de sustitución. Solo se reemplazan los nueve campos
//! anclados; todo lo demás se conserva byte a byte.

use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, NoExpand, Regex};

use crate::error::MigracionError;
use crate::tipos::Pago;

/// Medio de pago fijado en todas las sentencias generadas (1 = efectivo).
const MEDIO_PAGO_EFECTIVO: u32 = 1;

/// Primer literal decimal de la sentencia: el monto de ejemplo.
static MONTO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\.\d+\b").expect("valid amount regex"));

static ALUMNO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(\s*)\d+,\s*-- AlumnoId").expect("valid AlumnoId anchor"));

static MEDIO_PAGO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(\s*)\d+,\s*-- MedioPago").expect("valid MedioPago anchor"));

static NOTAS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'[^']*',\s*-- Notas").expect("valid Notas anchor"));

static RUBRO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(\s*)\d+,\s*-- RubroId").expect("valid RubroId anchor"));

static ES_COLEGIATURA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n(\s*)(?:true|false),\s*-- EsColegiatura").expect("valid EsColegiatura anchor")
});

static MES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n(\s*)[^,\n]+,\s*-- MesColegiatura").expect("valid MesColegiatura anchor")
});

static ANIO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n(\s*)[^,\n]+,\s*-- AnioColegiatura").expect("valid AnioColegiatura anchor")
});

/// Plantilla validada, inmutable durante toda la corrida.
#[derive(Debug, Clone)]
pub struct Plantilla {
    cuerpo: String,
}

impl Plantilla {
    /// Carga la plantilla desde un texto.
    ///
    /// Descarta todo lo anterior a la primera línea que empieza con
    /// `INSERT INTO` (sin distinguir caja) y verifica que las nueve anclas
    /// de sustitución estén presentes; una plantilla desfasada corta la
    /// corrida antes de procesar fila alguna.
    pub fn cargar(texto: &str) -> Result<Self, MigracionError> {
        let cuerpo = desde_insert(texto)?;
        let faltantes = anclas_faltantes(&cuerpo);
        if !faltantes.is_empty() {
            return Err(MigracionError::PlantillaDesfasada {
                faltantes: faltantes.join(", "),
            });
        }
        Ok(Self { cuerpo })
    }

    /// Carga la plantilla desde un archivo.
    pub fn desde_archivo<P: AsRef<Path>>(ruta: P) -> Result<Self, MigracionError> {
        Self::cargar(&std::fs::read_to_string(ruta)?)
    }

    /// Cuerpo de la sentencia tal como quedó tras la carga.
    #[must_use]
    pub fn texto(&self) -> &str {
        &self.cuerpo
    }

    /// Renderiza la sentencia de un pago.
    ///
    /// Sustituciones en orden fijo, cada una sobre la primera coincidencia
    /// de su ancla; las anclas no se traslapan, así que ningún otro literal
    /// de la plantilla resulta tocado.
    #[must_use]
    pub fn renderizar(&self, pago: &Pago) -> String {
        let monto = format!("{:.2}", pago.monto);
        let notas = pago.notas.replace('\'', "''");
        let mes = pago
            .mes
            .map_or_else(|| "NULL".to_string(), |mes| mes.to_string());
        let anio = pago
            .anio
            .map_or_else(|| "NULL".to_string(), |anio| anio.to_string());

        let sql = self
            .cuerpo
            .replacen("CURRENT_TIMESTAMP", &format!("'{}'", pago.fecha), 1);
        let sql = MONTO_RE.replace(&sql, NoExpand(&monto));
        let sql = ALUMNO_ID_RE.replace(&sql, |caps: &Captures| {
            format!(
                "\n{}{},                              -- AlumnoId",
                &caps[1], pago.alumno_id
            )
        });
        let sql = MEDIO_PAGO_RE.replace(&sql, |caps: &Captures| {
            format!(
                "\n{}{MEDIO_PAGO_EFECTIVO},                              -- MedioPago",
                &caps[1]
            )
        });
        let sql = NOTAS_RE.replace(&sql, NoExpand(&format!("'{notas}',              -- Notas")));
        let sql = RUBRO_ID_RE.replace(&sql, |caps: &Captures| {
            format!(
                "\n{}{},                              -- RubroId",
                &caps[1], pago.rubro_id
            )
        });
        let sql = ES_COLEGIATURA_RE.replace(&sql, |caps: &Captures| {
            format!(
                "\n{}{},                           -- EsColegiatura",
                &caps[1], pago.es_colegiatura
            )
        });
        let sql = MES_RE.replace(&sql, |caps: &Captures| {
            format!(
                "\n{}{mes},                              -- MesColegiatura",
                &caps[1]
            )
        });
        let sql = ANIO_RE.replace(&sql, |caps: &Captures| {
            format!(
                "\n{}{anio},                              -- AnioColegiatura",
                &caps[1]
            )
        });
        sql.into_owned()
    }
}

/// Recorta el texto a partir de la primera línea `INSERT INTO`.
fn desde_insert(texto: &str) -> Result<String, MigracionError> {
    let mut desplazamiento = 0;
    for linea in texto.split_inclusive('\n') {
        if linea.trim().to_uppercase().starts_with("INSERT INTO") {
            return Ok(texto[desplazamiento..].to_string());
        }
        desplazamiento += linea.len();
    }
    Err(MigracionError::SinInsert)
}

/// Campos cuya ancla no aparece en el cuerpo.
fn anclas_faltantes(cuerpo: &str) -> Vec<&'static str> {
    let mut faltantes = Vec::new();
    if !cuerpo.contains("CURRENT_TIMESTAMP") {
        faltantes.push("Fecha");
    }
    if !MONTO_RE.is_match(cuerpo) {
        faltantes.push("Monto");
    }
    let anclas: [(&'static str, &Regex); 7] = [
        ("AlumnoId", &ALUMNO_ID_RE),
        ("MedioPago", &MEDIO_PAGO_RE),
        ("Notas", &NOTAS_RE),
        ("RubroId", &RUBRO_ID_RE),
        ("EsColegiatura", &ES_COLEGIATURA_RE),
        ("MesColegiatura", &MES_RE),
        ("AnioColegiatura", &ANIO_RE),
    ];
    for (campo, ancla) in anclas {
        if !ancla.is_match(cuerpo) {
            faltantes.push(campo);
        }
    }
    faltantes
}
