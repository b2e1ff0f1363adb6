use crate::detection::domain::run_config::RunConfig;
use crate::shared::detection::Detection;

/// Greedy NMS: sort by score descending, then drop every box that overlaps
/// an already kept box by more than `config.iou_threshold`.
///
/// Unless `config.agnostic_nms` is set, only boxes of the same class compete.
/// At most `config.max_detections` boxes are returned, highest score first.
pub fn non_max_suppression(mut dets: Vec<Detection>, config: &RunConfig) -> Vec<Detection> {
    dets.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep: Vec<Detection> = Vec::new();
    let mut suppressed = vec![false; dets.len()];

    for i in 0..dets.len() {
        if keep.len() >= config.max_detections {
            break;
        }
        if suppressed[i] {
            continue;
        }
        for j in (i + 1)..dets.len() {
            if suppressed[j] {
                continue;
            }
            if !config.agnostic_nms && dets[i].class_id != dets[j].class_id {
                continue;
            }
            if dets[i].iou(&dets[j]) > config.iou_threshold {
                suppressed[j] = true;
            }
        }
        keep.push(dets[i].clone());
    }
    keep
}
