//! Recorrido de un lote: de las filas de la planilla a las sentencias.

use log::warn;

use crate::alumnos::IndiceAlumnos;
use crate::error::MigracionError;
use crate::fechas;
use crate::montos::parsear_monto;
use crate::plantilla::Plantilla;
use crate::planilla::Planilla;
use crate::rango::{self, RangoNombres, letra_de_columna};
use crate::texto::{colapsar_espacios, normalizar_nombre};
use crate::tipos::{ModoColegiatura, Pago, PoliticaMontos};

/// Configuración de un lote de pagos.
///
/// Las corridas históricas se diferenciaban solo en estos valores; acá son
/// una única configuración en lugar de variantes paralelas del recorrido.
#[derive(Debug, Clone)]
pub struct OpcionesLote {
    rango_nombres: RangoNombres,
    columnas_pago: Vec<u32>,
    politica_montos: PoliticaMontos,
    respaldo_fecha: Option<(u32, i32)>,
    modo_colegiatura: ModoColegiatura,
    rubro_id: i32,
}

impl OpcionesLote {
    /// Opciones para un rango de nombres, columnas de pago y rubro.
    ///
    /// Sin especificación de columnas se paga en la columna derivada de la
    /// de nombres por el desplazamiento de la plantilla de muestra. Las
    /// especificaciones malformadas cortan acá, antes de tocar la planilla.
    pub fn nuevas(
        rango_nombres: &str,
        columnas_pago: Option<&str>,
        rubro_id: i32,
    ) -> Result<Self, MigracionError> {
        let rango_nombres = RangoNombres::parsear(rango_nombres)?;
        let columnas_pago = rango::columnas_de_pago(columnas_pago, rango_nombres.columna)?;
        Ok(Self {
            rango_nombres,
            columnas_pago,
            politica_montos: PoliticaMontos::Estricta,
            respaldo_fecha: None,
            modo_colegiatura: ModoColegiatura::ForzadaFalsa,
            rubro_id,
        })
    }

    /// Cambia la política de validación de montos.
    #[inline]
    #[must_use]
    pub const fn politica_montos(mut self, politica: PoliticaMontos) -> Self {
        self.politica_montos = politica;
        self
    }

    /// Usa el primer día de `mes`/`anio` cuando el comentario no trae fecha.
    #[inline]
    #[must_use]
    pub const fn respaldo_fecha(mut self, mes: u32, anio: i32) -> Self {
        self.respaldo_fecha = Some((mes, anio));
        self
    }

    /// Cambia cómo se determinan los campos de colegiatura.
    #[inline]
    #[must_use]
    pub fn modo_colegiatura(mut self, modo: ModoColegiatura) -> Self {
        self.modo_colegiatura = modo;
        self
    }
}

/// Recorre la planilla y produce una sentencia por pago válido.
///
/// Los problemas de una fila (nombre sin correlato en el índice, monto no
/// monetario, comentario sin fecha) descartan esa fila y nada más; el orden
/// de las sentencias es el orden de las filas de la planilla.
pub struct GeneradorPagos<'a, P: Planilla> {
    planilla: &'a P,
    indice: &'a IndiceAlumnos,
    plantilla: &'a Plantilla,
    opciones: OpcionesLote,
}

impl<'a, P: Planilla> GeneradorPagos<'a, P> {
    /// Generador sobre una planilla, un índice y una plantilla ya cargados.
    #[inline]
    pub const fn nuevo(
        planilla: &'a P,
        indice: &'a IndiceAlumnos,
        plantilla: &'a Plantilla,
        opciones: OpcionesLote,
    ) -> Self {
        Self {
            planilla,
            indice,
            plantilla,
            opciones,
        }
    }

    /// Genera las sentencias del lote, en el orden de las filas.
    #[must_use]
    pub fn generar(&self) -> Vec<String> {
        let mut sentencias = Vec::new();
        for fila in self.opciones.rango_nombres.filas() {
            let celda = self.planilla.valor(self.opciones.rango_nombres.columna, fila);
            let Some(nombre) = celda.como_texto() else {
                continue;
            };
            let Some(alumno_id) = self.indice.buscar(&normalizar_nombre(&nombre)) else {
                warn!("fila {fila}: '{nombre}' no aparece en la tabla de referencia");
                continue;
            };
            for &columna in &self.opciones.columnas_pago {
                if let Some(pago) = self.pago_de_celda(columna, fila, alumno_id) {
                    sentencias.push(self.plantilla.renderizar(&pago).trim().to_string());
                }
            }
        }
        sentencias
    }

    /// Arma el pago de una celda, o `None` si la celda no registra un pago.
    fn pago_de_celda(&self, columna: u32, fila: u32, alumno_id: i32) -> Option<Pago> {
        let (es_colegiatura, mes, anio) = match &self.opciones.modo_colegiatura {
            ModoColegiatura::ForzadaFalsa => (false, None, None),
            ModoColegiatura::PorEncabezado {
                fila_encabezado,
                anio,
            } => {
                let encabezado = self.planilla.valor(columna, *fila_encabezado).como_texto()?;
                let Some(mes) = fechas::mes_desde_encabezado(&encabezado) else {
                    warn!(
                        "columna {}: encabezado '{encabezado}' sin mes reconocible",
                        letra_de_columna(columna)
                    );
                    return None;
                };
                (true, Some(mes), Some(*anio))
            }
        };

        let monto = parsear_monto(
            &self.planilla.valor(columna, fila),
            self.opciones.politica_montos,
        )?;

        let comentario = self.planilla.comentario(columna, fila).unwrap_or_default();
        let notas = colapsar_espacios(comentario);
        let fecha = match fechas::extraer_fecha(comentario) {
            Some(fecha) => fecha,
            None => {
                let Some((mes_respaldo, anio_respaldo)) = self.opciones.respaldo_fecha else {
                    warn!(
                        "celda {}{fila}: pago sin fecha en el comentario y sin respaldo",
                        letra_de_columna(columna)
                    );
                    return None;
                };
                fechas::fecha_de_respaldo(mes_respaldo, anio_respaldo)?
            }
        };

        Some(Pago {
            alumno_id,
            monto,
            fecha,
            rubro_id: self.opciones.rubro_id,
            mes,
            anio,
            es_colegiatura,
            notas,
        })
    }
}
