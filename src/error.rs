//! Errores de lectura de insumos y generación de sentencias.

/// Error al leer los insumos de un lote o al generar sus sentencias.
#[derive(thiserror::Error, Debug)]
pub enum MigracionError {
    /// Error de entrada/salida al leer un archivo de insumo.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Error al abrir o recorrer el libro de Excel.
    #[error("workbook error: {0}")]
    Libro(#[from] calamine::Error),
    /// Error al leer la tabla de referencia CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Error al abrir el contenedor ZIP del libro.
    #[error("archive error: {0}")]
    Archivo(#[from] zip::result::ZipError),
    /// Error al recorrer el XML de comentarios.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    /// El libro no contiene ninguna hoja utilizable.
    #[error("Workbook has no worksheet")]
    HojaFaltante,
    /// El rango de celdas indicado no tiene la forma `<col><fila>:<col><fila>`.
    #[error("Invalid cell range '{valor}'")]
    Rango {
        /// Especificación recibida.
        valor: String,
    },
    /// La especificación de columnas de pago no es una letra o rango de letras.
    #[error("Invalid fee column spec '{valor}'")]
    Columnas {
        /// Especificación recibida.
        valor: String,
    },
    /// La plantilla no contiene ninguna línea `INSERT INTO`.
    #[error("Template has no INSERT INTO statement")]
    SinInsert,
    /// La plantilla perdió una o más anclas de sustitución.
    #[error("Template is missing anchors: {faltantes}")]
    PlantillaDesfasada {
        /// Nombres de los campos sin ancla, separados por coma.
        faltantes: String,
    },
}
