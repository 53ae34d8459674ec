use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// Cuadrilátero de la región de interés, en píxeles de la imagen original.
/// Solo se usa para ordenar la grelha en orden de lectura.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoiQuad {
    pub top_left: [f64; 2],
    pub top_right: [f64; 2],
    pub bottom_right: [f64; 2],
    pub bottom_left: [f64; 2],
}

/// Un producto reconocido ocupando una región de una estantería.
/// Los porcentajes llegan en [0, 100]; la validación se hace en la ingesta
/// según la `IngestPolicy` configurada, nunca aquí.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub id: String,
    pub camera_id: String,
    #[serde(default)]
    pub image_name: String,
    pub roi_id: String,
    pub product_id: String,
    pub product_name: String,
    #[serde(default)]
    pub fruit_type: String,
    pub quantidade_pct: f64,
    pub qualidade_pct: f64,
    // El backend no siempre estima organización; las políticas lo tratan
    // como "si está definido".
    #[serde(default)]
    pub organizacao_pct: Option<f64>,
    pub contexto_pct: f64,
    #[serde(default)]
    pub insights: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub roi_quad_px: RoiQuad,
    // Nombre canónico: `score`. El backend también lo emite como
    // `pontuacao_total`; los dos nombres describen el mismo compuesto.
    #[serde(alias = "pontuacao_total")]
    pub score: f64,
    #[serde(default)]
    pub indice_var: f64,
}

/// Qué hacer con detecciones cuyos campos numéricos no son finitos
/// o caen fuera de [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IngestPolicy {
    /// Descartar la detección y seguir con el resto (por defecto).
    #[default]
    Drop,
    /// Rechazar la carga completa de la estantería.
    Reject,
}

fn pct_ok(value: f64) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}

impl Detection {
    /// Valida los campos que entran en promedios y clasificaciones.
    pub fn validate(&self) -> DomainResult<()> {
        let checks = [
            ("quantidade_pct", self.quantidade_pct),
            ("qualidade_pct", self.qualidade_pct),
            ("contexto_pct", self.contexto_pct),
            ("score", self.score),
        ];
        for (field, value) in checks {
            if !pct_ok(value) {
                return Err(DomainError::InvalidInput(format!(
                    "{field} fuera de rango en detección {}: {value}",
                    self.id
                )));
            }
        }
        if let Some(org) = self.organizacao_pct {
            if !pct_ok(org) {
                return Err(DomainError::InvalidInput(format!(
                    "organizacao_pct fuera de rango en detección {}: {org}",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

/// Aplica la política de ingesta a una lista recién deserializada.
pub fn apply_ingest_policy(
    detections: Vec<Detection>,
    policy: IngestPolicy,
) -> DomainResult<Vec<Detection>> {
    match policy {
        IngestPolicy::Reject => {
            for d in &detections {
                d.validate()?;
            }
            Ok(detections)
        }
        IngestPolicy::Drop => {
            let mut kept = Vec::with_capacity(detections.len());
            for d in detections {
                match d.validate() {
                    Ok(()) => kept.push(d),
                    Err(e) => tracing::warn!("Detección descartada en la ingesta: {e}"),
                }
            }
            Ok(kept)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str, score: f64) -> Detection {
        Detection {
            id: id.to_string(),
            camera_id: "6591".to_string(),
            image_name: String::new(),
            roi_id: format!("roi-{id}"),
            product_id: format!("p-{id}"),
            product_name: "Maçã Gala".to_string(),
            fruit_type: "maçã".to_string(),
            quantidade_pct: 80.0,
            qualidade_pct: 90.0,
            organizacao_pct: Some(85.0),
            contexto_pct: 70.0,
            insights: String::new(),
            confidence: 0.9,
            roi_quad_px: RoiQuad::default(),
            score,
            indice_var: 0.0,
        }
    }

    #[test]
    fn pontuacao_total_alias_maps_to_score() {
        let json = r#"{
            "id": "d1", "camera_id": "6591", "roi_id": "r1",
            "product_id": "p1", "product_name": "Banana",
            "quantidade_pct": 55.0, "qualidade_pct": 60.0,
            "contexto_pct": 70.0, "pontuacao_total": 42.5
        }"#;
        let d: Detection = serde_json::from_str(json).unwrap();
        assert_eq!(d.score, 42.5);
        assert!(d.organizacao_pct.is_none());
    }

    #[test]
    fn drop_policy_skips_malformed() {
        let mut bad = sample("bad", f64::NAN);
        bad.quantidade_pct = 120.0;
        let kept =
            apply_ingest_policy(vec![sample("ok", 80.0), bad], IngestPolicy::Drop).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "ok");
    }

    #[test]
    fn reject_policy_fails_whole_batch() {
        let mut bad = sample("bad", 80.0);
        bad.contexto_pct = -3.0;
        let res = apply_ingest_policy(vec![sample("ok", 80.0), bad], IngestPolicy::Reject);
        assert!(res.is_err());
    }
}
