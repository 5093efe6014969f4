//! Tabla de referencia de alumnos: nombre normalizado a identificador.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::MigracionError;
use crate::texto::normalizar_nombre;

/// Fila del CSV exportado del sistema.
#[derive(Debug, Deserialize)]
struct FilaAlumno {
    #[serde(rename = "Id")]
    id: i32,
    #[serde(rename = "NombreCompleto")]
    nombre_completo: String,
}

/// Índice de alumnos por nombre normalizado.
///
/// Se construye una vez por corrida. Ante dos filas con el mismo nombre
/// normalizado gana la última; el CSV de referencia no se depura acá.
#[derive(Debug, Clone, Default)]
pub struct IndiceAlumnos {
    por_nombre: HashMap<String, i32>,
}

impl IndiceAlumnos {
    /// Carga el índice desde un CSV con columnas `Id` y `NombreCompleto`.
    #[inline]
    pub fn desde_csv<P: AsRef<Path>>(ruta: P) -> Result<Self, MigracionError> {
        let archivo = std::fs::File::open(ruta)?;
        Self::desde_lector(archivo)
    }

    /// Carga el índice desde cualquier `Read` con el mismo formato.
    pub fn desde_lector<R: Read>(lector: R) -> Result<Self, MigracionError> {
        let mut csv = csv::Reader::from_reader(lector);
        let mut por_nombre = HashMap::new();
        for fila in csv.deserialize() {
            let fila: FilaAlumno = fila?;
            por_nombre.insert(normalizar_nombre(&fila.nombre_completo), fila.id);
        }
        Ok(Self { por_nombre })
    }

    /// Identificador del alumno con ese nombre ya normalizado.
    #[must_use]
    pub fn buscar(&self, nombre_normalizado: &str) -> Option<i32> {
        self.por_nombre.get(nombre_normalizado).copied()
    }

    /// Cantidad de alumnos indexados.
    #[must_use]
    pub fn len(&self) -> usize {
        self.por_nombre.len()
    }

    /// Si el índice no tiene ninguna entrada.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.por_nombre.is_empty()
    }
}
