//! Agrupación y orden de las vistas: grelha, ranking de alertas y
//! resúmenes por sección, producto y globales.
//!
//! Las claves de agrupación son cadenas exactas, sin normalización de
//! mayúsculas ni espacios.

use std::cmp::Ordering;

use serde::Serialize;

use crate::domain::{
    detection::Detection,
    status::{ClassificationPolicy, Status},
};

/// Banda de presentación usada por la grelha y la barra lateral.
/// Regla de color (70/50), distinta de las tres políticas de estado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Good,
    Fair,
    Bad,
}

impl ScoreBand {
    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Good => "Bom",
            ScoreBand::Fair => "Razoável",
            ScoreBand::Bad => "Mau",
        }
    }
}

pub fn score_band(score: f64) -> ScoreBand {
    if score >= 70.0 {
        ScoreBand::Good
    } else if score >= 50.0 {
        ScoreBand::Fair
    } else {
        ScoreBand::Bad
    }
}

/// Tolerancia vertical de la grelha: dos regiones a menos de 50 px en y
/// cuentan como la misma fila.
const ROW_TOLERANCE_PX: f64 = 50.0;

/// Orden de lectura de la grelha: de arriba a abajo por la esquina
/// superior izquierda, desempatando por x dentro de la misma fila.
///
/// La tolerancia por pares no define un orden total (tres regiones a 40 px
/// una de otra forman un ciclo), así que primero se ordena por y y después
/// se forman filas: cada región a menos de 50 px del ancla de la fila
/// actual pertenece a esa fila, y cada fila se ordena por x. Ambas
/// pasadas son estables.
pub fn grid_order(detections: &[Detection]) -> Vec<Detection> {
    let mut sorted = detections.to_vec();
    sorted.sort_by(|a, b| {
        let ay = a.roi_quad_px.top_left[1];
        let by = b.roi_quad_px.top_left[1];
        ay.partial_cmp(&by).unwrap_or(Ordering::Equal)
    });

    let mut rows: Vec<Vec<Detection>> = Vec::new();
    let mut anchor_y = 0.0;
    for d in sorted {
        let y = d.roi_quad_px.top_left[1];
        if rows.is_empty() || (y - anchor_y).abs() > ROW_TOLERANCE_PX {
            anchor_y = y;
            rows.push(Vec::new());
        }
        if let Some(row) = rows.last_mut() {
            row.push(d);
        }
    }

    for row in &mut rows {
        row.sort_by(|a, b| {
            let ax = a.roi_quad_px.top_left[0];
            let bx = b.roi_quad_px.top_left[0];
            ax.partial_cmp(&bx).unwrap_or(Ordering::Equal)
        });
    }
    rows.into_iter().flatten().collect()
}

/// Barra lateral de alertas: solo score <= 50, peor primero.
pub fn alert_ranking(detections: &[Detection]) -> Vec<Detection> {
    let mut ranked: Vec<Detection> = detections
        .iter()
        .filter(|d| d.score <= 50.0)
        .cloned()
        .collect();
    ranked.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));
    ranked
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionSummary {
    pub camera_id: String,
    pub item_count: usize,
    pub avg_score: f64,
    pub avg_stock: f64,
    pub status: Status,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub product_name: String,
    pub item_count: usize,
    pub avg_score: f64,
    pub avg_stock: f64,
    pub band: ScoreBand,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlobalSummary {
    pub critical_pct: f64,
    pub alert_pct: f64,
    pub avg_stock: f64,
    pub avg_score: f64,
    pub total: usize,
}

fn mean<F: Fn(&Detection) -> f64>(items: &[&Detection], field: F) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let sum: f64 = items.iter().map(|d| field(*d)).sum();
    (sum / items.len() as f64).round()
}

/// Claves únicas en orden de primera aparición.
fn first_seen_keys<'a, F>(detections: &'a [Detection], key: F) -> Vec<String>
where
    F: Fn(&'a Detection) -> &'a str,
{
    let mut keys: Vec<String> = Vec::new();
    for d in detections {
        let k = key(d);
        if !keys.iter().any(|existing| existing == k) {
            keys.push(k.to_string());
        }
    }
    keys
}

/// Tarjetas de sección: agrupa por `camera_id`, promedia el score y
/// clasifica con la política de sección. Orden final por prioridad de
/// estado (crítico, alerta, ok), estable dentro de la misma prioridad.
pub fn section_summaries(detections: &[Detection]) -> Vec<SectionSummary> {
    let mut sections: Vec<SectionSummary> = first_seen_keys(detections, |d| d.camera_id.as_str())
        .into_iter()
        .map(|camera_id| {
            let items: Vec<&Detection> = detections
                .iter()
                .filter(|d| d.camera_id == camera_id)
                .collect();
            let avg_score = mean(&items, |d| d.score);
            SectionSummary {
                camera_id,
                item_count: items.len(),
                avg_score,
                avg_stock: mean(&items, |d| d.quantidade_pct),
                status: ClassificationPolicy::SectionAverage.classify_score(avg_score),
            }
        })
        .collect();
    sections.sort_by_key(|s| s.status.priority());
    sections
}

/// Visión general por producto: agrupa por `product_name` en orden de
/// descubrimiento; no se aplica ningún orden posterior.
pub fn product_summaries(detections: &[Detection]) -> Vec<ProductSummary> {
    first_seen_keys(detections, |d| d.product_name.as_str())
        .into_iter()
        .map(|product_name| {
            let items: Vec<&Detection> = detections
                .iter()
                .filter(|d| d.product_name == product_name)
                .collect();
            let avg_score = mean(&items, |d| d.score);
            ProductSummary {
                product_name,
                item_count: items.len(),
                avg_score,
                avg_stock: mean(&items, |d| d.quantidade_pct),
                band: score_band(avg_score),
            }
        })
        .collect()
}

/// Paneles superiores del dashboard. Los porcentajes de crítico/alerta se
/// cuentan con la política `ShelfCard` sobre la vista actual.
pub fn global_summary(detections: &[Detection]) -> GlobalSummary {
    let total = detections.len();
    if total == 0 {
        return GlobalSummary {
            critical_pct: 0.0,
            alert_pct: 0.0,
            avg_stock: 0.0,
            avg_score: 0.0,
            total: 0,
        };
    }
    let policy = ClassificationPolicy::ShelfCard;
    let critical = detections
        .iter()
        .filter(|d| policy.classify(d) == Status::Critical)
        .count();
    let alert = detections
        .iter()
        .filter(|d| policy.classify(d) == Status::Alert)
        .count();
    let refs: Vec<&Detection> = detections.iter().collect();
    GlobalSummary {
        critical_pct: (critical as f64 / total as f64 * 100.0).round(),
        alert_pct: (alert as f64 / total as f64 * 100.0).round(),
        avg_stock: mean(&refs, |d| d.quantidade_pct),
        avg_score: mean(&refs, |d| d.score),
        total,
    }
}
