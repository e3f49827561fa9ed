use serde::Serialize;

use crate::model::Condition;

/// Ambient backdrop family for a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
    Clear,
    Clouds,
    Rain,
    Snow,
    Fog,
}

impl Scene {
    pub fn for_condition(condition: Condition) -> Self {
        match condition {
            Condition::Rain | Condition::Drizzle | Condition::Thunderstorm => Scene::Rain,
            Condition::Snow => Scene::Snow,
            Condition::Mist
            | Condition::Fog
            | Condition::Haze
            | Condition::Smoke
            | Condition::Dust
            | Condition::Sand
            | Condition::Ash
            | Condition::Tornado
            | Condition::Squall => Scene::Fog,
            Condition::Clear => Scene::Clear,
            Condition::Clouds | Condition::Unknown => Scene::Clouds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_condition_has_a_scene() {
        let table = [
            (Condition::Thunderstorm, Scene::Rain),
            (Condition::Drizzle, Scene::Rain),
            (Condition::Rain, Scene::Rain),
            (Condition::Snow, Scene::Snow),
            (Condition::Mist, Scene::Fog),
            (Condition::Smoke, Scene::Fog),
            (Condition::Haze, Scene::Fog),
            (Condition::Dust, Scene::Fog),
            (Condition::Fog, Scene::Fog),
            (Condition::Sand, Scene::Fog),
            (Condition::Ash, Scene::Fog),
            (Condition::Squall, Scene::Fog),
            (Condition::Tornado, Scene::Fog),
            (Condition::Clear, Scene::Clear),
            (Condition::Clouds, Scene::Clouds),
            (Condition::Unknown, Scene::Clouds),
        ];
        assert_eq!(table.len(), Condition::all().len());

        for (condition, expected) in table {
            assert_eq!(Scene::for_condition(condition), expected, "{condition}");
        }
    }

    #[test]
    fn scene_serializes_lowercase() {
        let json = serde_json::to_string(&Scene::for_condition(Condition::Drizzle)).unwrap();
        assert_eq!(json, "\"rain\"");
    }

    #[test]
    fn tornado_and_squall_use_fog() {
        assert_eq!(Scene::for_condition(Condition::Tornado), Scene::Fog);
        assert_eq!(Scene::for_condition(Condition::Squall), Scene::Fog);
    }
}
