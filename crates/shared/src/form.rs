use crate::error::FormError;
use crate::models::{Category, CreateSmokeData, Floor, MapId, PercentPoint};

/// Raw contents of the creation form, as typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct SmokeDraft {
    pub title: String,
    pub video_url: String,
    /// Kept as text so partial input survives re-renders.
    pub timestamp: String,
    pub category: Category,
    pub floor: Option<Floor>,
}

impl Default for SmokeDraft {
    fn default() -> Self {
        SmokeDraft {
            title: String::new(),
            video_url: String::new(),
            timestamp: String::new(),
            category: Category::Smoke,
            floor: None,
        }
    }
}

/// Whole seconds greater than zero.
pub fn parse_timestamp(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|ts| *ts > 0)
}

impl SmokeDraft {
    /// First problem blocking submission, in form order.
    pub fn check(&self, point: Option<PercentPoint>) -> Result<(), FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::MissingTitle);
        }
        if self.video_url.trim().is_empty() {
            return Err(FormError::MissingVideoUrl);
        }
        if parse_timestamp(&self.timestamp).is_none() {
            return Err(FormError::InvalidTimestamp);
        }
        if point.is_none() {
            return Err(FormError::MissingPoint);
        }
        Ok(())
    }

    /// Build the create payload.
    ///
    /// On maps with floors an unset floor defaults to upper instead of
    /// blocking; on maps without floors the tag is left out entirely.
    pub fn to_payload(
        &self,
        point: Option<PercentPoint>,
        map_id: MapId,
        map_has_floors: bool,
    ) -> Result<CreateSmokeData, FormError> {
        self.check(point)?;
        let point = point.ok_or(FormError::MissingPoint)?;
        let timestamp = parse_timestamp(&self.timestamp).ok_or(FormError::InvalidTimestamp)?;
        let floor = if map_has_floors {
            Some(self.floor.unwrap_or_default())
        } else {
            None
        };
        Ok(CreateSmokeData {
            title: self.title.trim().to_string(),
            video_url: self.video_url.trim().to_string(),
            timestamp,
            category: self.category,
            x_percent: point.x,
            y_percent: point.y,
            map_id,
            floor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> SmokeDraft {
        SmokeDraft {
            title: " CT smoke ".to_string(),
            video_url: "https://youtu.be/abc123".to_string(),
            timestamp: "10".to_string(),
            category: Category::Smoke,
            floor: None,
        }
    }

    const POINT: PercentPoint = PercentPoint { x: 25.0, y: 50.0 };

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("42"), Some(42));
        assert_eq!(parse_timestamp(" 7 "), Some(7));
        assert_eq!(parse_timestamp("0"), None);
        assert_eq!(parse_timestamp("-3"), None);
        assert_eq!(parse_timestamp("1.5"), None);
        assert_eq!(parse_timestamp("abc"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_check_reports_first_problem() {
        let mut d = filled();
        d.title = "   ".to_string();
        d.timestamp = "0".to_string();
        assert_eq!(d.check(Some(POINT)), Err(FormError::MissingTitle));

        let mut d = filled();
        d.video_url.clear();
        assert_eq!(d.check(Some(POINT)), Err(FormError::MissingVideoUrl));

        let mut d = filled();
        d.timestamp = "soon".to_string();
        assert_eq!(d.check(Some(POINT)), Err(FormError::InvalidTimestamp));

        assert_eq!(filled().check(None), Err(FormError::MissingPoint));
        assert_eq!(filled().check(Some(POINT)), Ok(()));
    }

    #[test]
    fn test_payload_trims_and_copies_point() {
        let payload = filled().to_payload(Some(POINT), 3, false).unwrap();
        assert_eq!(payload.title, "CT smoke");
        assert_eq!(payload.timestamp, 10);
        assert_eq!(payload.x_percent, 25.0);
        assert_eq!(payload.y_percent, 50.0);
        assert_eq!(payload.map_id, 3);
        assert_eq!(payload.floor, None);
    }

    #[test]
    fn test_payload_defaults_floor_on_floored_maps() {
        let payload = filled().to_payload(Some(POINT), 3, true).unwrap();
        assert_eq!(payload.floor, Some(Floor::Upper));

        let mut d = filled();
        d.floor = Some(Floor::Lower);
        assert_eq!(d.to_payload(Some(POINT), 3, true).unwrap().floor, Some(Floor::Lower));
        assert_eq!(d.to_payload(Some(POINT), 3, false).unwrap().floor, None);
    }
}
