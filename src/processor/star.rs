use crate::processor::{
    Row,
    transform::{RowTransform, TransformError},
};

/// A star catalogue entry (`StarID,ProperName,X,Y,Z`)
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub id: i64,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Builds [`Star`]s from catalogue rows
#[derive(Debug, Clone, Copy, Default)]
pub struct StarTransform;

const STAR_FIELDS: usize = 5;

impl RowTransform for StarTransform {
    type Output = Star;

    fn create(&self, row: Row) -> Result<Star, TransformError> {
        if row.len() < STAR_FIELDS {
            return Err(TransformError::new(
                format!("expected {} fields, got {}", STAR_FIELDS, row.len()),
                row,
            ));
        }

        let id = atoi_simd::parse::<i64>(row[0].trim().as_bytes())
            .map_err(|e| format!("bad StarID {:?}: {}", row[0], e));
        let id = match id {
            Ok(id) => id,
            Err(message) => return Err(TransformError::new(message, row)),
        };

        let coords: Result<Vec<f64>, String> = row[2..STAR_FIELDS]
            .iter()
            .map(|field| {
                fast_float::parse::<f64, _>(field.trim())
                    .map_err(|e| format!("bad coordinate {field:?}: {e}"))
            })
            .collect();
        let coords = match coords {
            Ok(coords) => coords,
            Err(message) => return Err(TransformError::new(message, row)),
        };

        Ok(Star {
            id,
            name: row[1].clone(),
            x: coords[0],
            y: coords[1],
            z: coords[2],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_star_from_row() {
        let star = StarTransform
            .create(row(&["70667", "Proxima Centauri", "-0.47175", "-0.36132", "-1.15037"]))
            .unwrap();
        assert_eq!(star.id, 70667);
        assert_eq!(star.name, "Proxima Centauri");
        assert_eq!(star.z, -1.15037);
    }

    #[test]
    fn test_nameless_star_allowed() {
        let star = StarTransform
            .create(row(&["3", "", "277.11358", "0.02422", "223.27753"]))
            .unwrap();
        assert_eq!(star.name, "");
    }

    #[test]
    fn test_bad_number_carries_row() {
        let bad = row(&["x1", "Sol", "0", "0", "0"]);
        let err = StarTransform.create(bad.clone()).unwrap_err();
        assert_eq!(err.row, bad);
    }

    #[test]
    fn test_short_row_rejected() {
        let err = StarTransform.create(row(&["0", "Sol"])).unwrap_err();
        assert!(err.message.contains("expected 5 fields"));
    }
}
