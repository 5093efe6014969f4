//! Alta de alumnos: sentencias `INSERT` para la tabla `Alumnos`.

use chrono::{DateTime, FixedOffset, Utc};

use crate::planilla::Planilla;
use crate::rango::RangoNombres;
use crate::tipos::NombreAlumno;

/// Parámetros fijos de un lote de altas de alumnos.
#[derive(Debug, Clone)]
pub struct GeneradorAlumnos {
    /// Grado al que se inscribe el lote completo.
    pub grado_id: i32,
    /// Sección del lote (una letra, p. ej. `B`).
    pub seccion: String,
    /// Sede del colegio.
    pub sede_id: i32,
    /// Usuario que queda como creador de los registros.
    pub usuario_creacion_id: i32,
}

impl GeneradorAlumnos {
    /// Generador para un grado y sección, con sede y usuario por omisión.
    #[inline]
    pub fn nuevo(grado_id: i32, seccion: &str) -> Self {
        Self {
            grado_id,
            seccion: seccion.to_string(),
            sede_id: 1,
            usuario_creacion_id: 1,
        }
    }

    /// Sentencia de alta para un alumno, fechada al momento de la corrida.
    #[must_use]
    pub fn renderizar(&self, nombre: &NombreAlumno) -> String {
        self.renderizar_con_fecha(nombre, &marca_guatemala().to_rfc3339())
    }

    /// Sentencia de alta con una marca de tiempo dada.
    ///
    /// Los nombres opcionales vacíos se insertan como `NULL`; los presentes
    /// van entre comillas simples con escapado `''`. Los campos de auditoría
    /// y observaciones quedan en `NULL`, igual que en las corridas manuales.
    #[must_use]
    pub fn renderizar_con_fecha(&self, nombre: &NombreAlumno, fecha_creacion: &str) -> String {
        format!(
            "INSERT INTO public.\"Alumnos\"(\n\
             \t\"PrimerNombre\", \"SegundoNombre\", \"PrimerApellido\", \"SegundoApellido\", \
             \"SedeId\", \"GradoId\", \"Becado\", \"BecaParcialPorcentaje\", \"Codigo\", \
             \"Estado\", \"FechaActualizacion\", \"FechaCreacion\", \"Seccion\", \
             \"UsuarioActualizacionId\", \"UsuarioCreacionId\", \"Observaciones\", \
             \"Direccion\", \"TercerNombre\")\n\
             \tVALUES ({primer_nombre}\n\
             \t, {segundo_nombre}\n\
             \t, {primer_apellido}\n\
             \t, {segundo_apellido}\n\
             \t, {sede_id}\n\
             \t, {grado_id}\n\
             \t, NULL\n\
             \t, NULL\n\
             \t, 'codigo'\n\
             \t, 1\n\
             \t, NULL\n\
             \t, '{fecha_creacion}'\n\
             \t, '{seccion}'\n\
             \t, NULL\n\
             \t, {usuario_creacion_id}\n\
             \t, NULL\n\
             \t, NULL\n\
             \t, {tercer_nombre}\n\
             \t);\n",
            primer_nombre = citar(&nombre.primer_nombre),
            segundo_nombre = citar_o_null(&nombre.segundo_nombre),
            primer_apellido = citar(&nombre.primer_apellido),
            segundo_apellido = citar_o_null(&nombre.segundo_apellido),
            sede_id = self.sede_id,
            grado_id = self.grado_id,
            fecha_creacion = fecha_creacion,
            seccion = self.seccion.replace('\'', "''"),
            usuario_creacion_id = self.usuario_creacion_id,
            tercer_nombre = citar_o_null(&nombre.tercer_nombre),
        )
    }
}

/// Valores de nombre no vacíos de una columna de la planilla, en orden.
pub fn extraer_nombres<P: Planilla>(planilla: &P, rango: &RangoNombres) -> Vec<String> {
    rango
        .filas()
        .filter_map(|fila| planilla.valor(rango.columna, fila).como_texto())
        .collect()
}

/// Hora local de Guatemala: UTC-6 fijo, sin horario de verano.
fn marca_guatemala() -> DateTime<FixedOffset> {
    let gmt_menos_6 = FixedOffset::west_opt(6 * 3600).expect("valid UTC-6 offset");
    Utc::now().with_timezone(&gmt_menos_6)
}

/// Literal entre comillas simples, con `'` escapada como `''`.
fn citar(valor: &str) -> String {
    format!("'{}'", valor.replace('\'', "''"))
}

/// Literal citado, o `NULL` si el campo quedó vacío.
fn citar_o_null(valor: &str) -> String {
    if valor.is_empty() {
        "NULL".to_string()
    } else {
        citar(valor)
    }
}
