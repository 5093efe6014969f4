//! Tipos de dominio compartidos por el pipeline de generación.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Valor monetario, con `Decimal` para montos exactos.
pub type Money = Decimal;

/// Componentes estructurados del nombre completo de un alumno.
///
/// Los campos que el nombre de origen no trae quedan como cadena vacía,
/// nunca como marcador nulo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NombreAlumno {
    /// Primer apellido.
    pub primer_apellido: String,
    /// Segundo apellido.
    pub segundo_apellido: String,
    /// Primer nombre.
    pub primer_nombre: String,
    /// Segundo nombre.
    pub segundo_nombre: String,
    /// Tercer nombre.
    pub tercer_nombre: String,
}

/// Fecha de pago extraída del comentario de una celda.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FechaPago {
    /// Fecha calendario reconocida.
    Iso(NaiveDate),
    /// Día, palabra de mes no reconocida y año, conservados tal cual.
    Cruda(String),
}

impl std::fmt::Display for FechaPago {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Iso(fecha) => write!(f, "{fecha}"),
            Self::Cruda(texto) => f.write_str(texto),
        }
    }
}

/// Valor crudo de una celda de la planilla.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Celda {
    /// Celda vacía o inexistente.
    #[default]
    Vacia,
    /// Valor numérico nativo del libro.
    Numero(f64),
    /// Texto libre.
    Texto(String),
}

impl Celda {
    /// Representación textual del valor, o `None` si la celda está vacía.
    #[must_use]
    pub fn como_texto(&self) -> Option<String> {
        match self {
            Self::Vacia => None,
            Self::Numero(valor) => Some(valor.to_string()),
            Self::Texto(texto) => {
                let recortado = texto.trim();
                (!recortado.is_empty()).then(|| recortado.to_string())
            }
        }
    }
}

/// Política de validación de montos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoliticaMontos {
    /// Acepta cualquier valor convertible a número, incluso cero o negativo.
    Permisiva,
    /// Rechaza tokens no monetarios, fechas y valores no positivos.
    #[default]
    Estricta,
}

/// Cómo se determinan `EsColegiatura` y `MesColegiatura`/`AnioColegiatura`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModoColegiatura {
    /// Pagos que no son colegiatura: `EsColegiatura` falso, mes y año en NULL.
    ForzadaFalsa,
    /// Colegiaturas: el mes sale del encabezado de cada columna de pago.
    PorEncabezado {
        /// Fila (base 1) donde están los encabezados de mes.
        fila_encabezado: u32,
        /// Año de colegiatura para todo el lote.
        anio: i32,
    },
}

/// Un pago ya resuelto, listo para renderizar en la plantilla.
#[derive(Debug, Clone)]
pub struct Pago {
    /// Identificador del alumno en la tabla de referencia.
    pub alumno_id: i32,
    /// Monto del pago.
    pub monto: Money,
    /// Fecha del pago.
    pub fecha: FechaPago,
    /// Rubro al que se imputa el pago.
    pub rubro_id: i32,
    /// Mes de colegiatura, si aplica.
    pub mes: Option<u32>,
    /// Año de colegiatura, si aplica.
    pub anio: Option<i32>,
    /// Si el pago corresponde a colegiatura.
    pub es_colegiatura: bool,
    /// Texto completo del comentario de la celda, con espacios normalizados.
    pub notas: String,
}
