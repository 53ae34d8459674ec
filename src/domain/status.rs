use serde::{Deserialize, Serialize};

use crate::domain::detection::Detection;

/// Estado de salud tri-nivel de una detección o sección.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Critical,
    Alert,
    Ok,
}

impl Status {
    /// Prioridad para ordenar tarjetas: crítico primero, ok al final.
    pub fn priority(self) -> u8 {
        match self {
            Status::Critical => 0,
            Status::Alert => 1,
            Status::Ok => 2,
        }
    }
}

/// Las tres reglas de clasificación que conviven en el dashboard.
///
/// NO son numéricamente consistentes entre sí y eso es intencional: cada
/// vista usa su propio corte. Unificarlas sería un cambio de
/// comportamiento revisado, no una limpieza. Los tests de regresión fijan
/// cada corte exacto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationPolicy {
    /// Filtro global del store: score < 50 crítico, < 75 alerta.
    GlobalScore,
    /// Tarjetas de resumen: combina score, estoque y organización.
    ShelfCard,
    /// Promedio por sección: cortes inclusivos <= 30 y <= 70.
    SectionAverage,
}

impl ClassificationPolicy {
    /// Clasifica una detección individual bajo esta política.
    pub fn classify(&self, d: &Detection) -> Status {
        match self {
            ClassificationPolicy::GlobalScore | ClassificationPolicy::SectionAverage => {
                self.classify_score(d.score)
            }
            ClassificationPolicy::ShelfCard => {
                // El orden importa: crítico se comprueba antes que alerta.
                if d.score < 50.0
                    || d.quantidade_pct < 30.0
                    || d.organizacao_pct.is_some_and(|org| org < 40.0)
                {
                    return Status::Critical;
                }
                if d.score < 70.0
                    || d.quantidade_pct < 50.0
                    || d.organizacao_pct.is_some_and(|org| org < 60.0)
                {
                    return Status::Alert;
                }
                Status::Ok
            }
        }
    }

    /// Clasifica un score suelto (p. ej. el promedio de una sección).
    /// Para `ShelfCard` solo aplica la cláusula de score; las cláusulas de
    /// estoque y organización requieren la detección completa.
    pub fn classify_score(&self, score: f64) -> Status {
        match self {
            ClassificationPolicy::GlobalScore => {
                if score < 50.0 {
                    Status::Critical
                } else if score < 75.0 {
                    Status::Alert
                } else {
                    Status::Ok
                }
            }
            ClassificationPolicy::ShelfCard => {
                if score < 50.0 {
                    Status::Critical
                } else if score < 70.0 {
                    Status::Alert
                } else {
                    Status::Ok
                }
            }
            ClassificationPolicy::SectionAverage => {
                if score <= 30.0 {
                    Status::Critical
                } else if score <= 70.0 {
                    Status::Alert
                } else {
                    Status::Ok
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::detection::RoiQuad;

    fn detection(score: f64, stock: f64, org: Option<f64>) -> Detection {
        Detection {
            id: "d".into(),
            camera_id: "6591".into(),
            image_name: String::new(),
            roi_id: "r".into(),
            product_id: "p".into(),
            product_name: "Pera Rocha".into(),
            fruit_type: String::new(),
            quantidade_pct: stock,
            qualidade_pct: 80.0,
            organizacao_pct: org,
            contexto_pct: 80.0,
            insights: String::new(),
            confidence: 0.9,
            roi_quad_px: RoiQuad::default(),
            score,
            indice_var: 0.0,
        }
    }

    // Regresión: cortes exactos de la política global.
    #[test]
    fn global_score_cutpoints() {
        let p = ClassificationPolicy::GlobalScore;
        assert_eq!(p.classify_score(49.9), Status::Critical);
        assert_eq!(p.classify_score(50.0), Status::Alert);
        assert_eq!(p.classify_score(74.9), Status::Alert);
        assert_eq!(p.classify_score(75.0), Status::Ok);
    }

    // Regresión: la política de sección usa cortes inclusivos.
    #[test]
    fn section_average_cutpoints_are_inclusive() {
        let p = ClassificationPolicy::SectionAverage;
        assert_eq!(p.classify_score(30.0), Status::Critical);
        assert_eq!(p.classify_score(30.1), Status::Alert);
        assert_eq!(p.classify_score(70.0), Status::Alert);
        assert_eq!(p.classify_score(70.1), Status::Ok);
    }

    #[test]
    fn shelf_card_checks_critical_before_alert() {
        let p = ClassificationPolicy::ShelfCard;
        // score sano pero estoque crítico
        assert_eq!(p.classify(&detection(90.0, 25.0, None)), Status::Critical);
        // organización definida y baja
        assert_eq!(
            p.classify(&detection(90.0, 80.0, Some(35.0))),
            Status::Critical
        );
        // organización ausente: la cláusula no aplica
        assert_eq!(p.classify(&detection(90.0, 80.0, None)), Status::Ok);
        // franja de alerta por estoque
        assert_eq!(p.classify(&detection(90.0, 45.0, None)), Status::Alert);
        assert_eq!(
            p.classify(&detection(90.0, 80.0, Some(55.0))),
            Status::Alert
        );
        assert_eq!(p.classify(&detection(69.9, 80.0, None)), Status::Alert);
        assert_eq!(p.classify(&detection(70.0, 80.0, None)), Status::Ok);
    }

    // Cada política produce exactamente un estado (partición, no solape).
    #[test]
    fn every_policy_partitions() {
        let policies = [
            ClassificationPolicy::GlobalScore,
            ClassificationPolicy::ShelfCard,
            ClassificationPolicy::SectionAverage,
        ];
        for p in policies {
            for score in [0.0, 30.0, 49.9, 50.0, 70.0, 74.9, 75.0, 100.0] {
                for stock in [10.0, 40.0, 90.0] {
                    for org in [None, Some(20.0), Some(50.0), Some(90.0)] {
                        let s = p.classify(&detection(score, stock, org));
                        assert!(matches!(s, Status::Critical | Status::Alert | Status::Ok));
                    }
                }
            }
        }
    }
}
