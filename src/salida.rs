//! Elección del nombre del artefacto de salida y escritura final.

use std::path::{Path, PathBuf};

use crate::error::MigracionError;

/// Ruta de salida `<base>.sql` en el directorio de trabajo.
///
/// Si ya existe un archivo con ese nombre no se pisa: se prueba `<base>-2.sql`,
/// `<base>-3.sql`, y así hasta dar con un nombre libre.
#[must_use]
pub fn ruta_de_salida(base: &str) -> PathBuf {
    let candidata = PathBuf::from(format!("{base}.sql"));
    if !candidata.exists() {
        return candidata;
    }
    let mut contador = 2u32;
    loop {
        let candidata = PathBuf::from(format!("{base}-{contador}.sql"));
        if !candidata.exists() {
            return candidata;
        }
        contador += 1;
    }
}

/// Escribe las sentencias de un lote separadas por una línea en blanco.
pub fn escribir_sentencias(ruta: &Path, sentencias: &[String]) -> Result<(), MigracionError> {
    std::fs::write(ruta, sentencias.join("\n\n"))?;
    Ok(())
}
