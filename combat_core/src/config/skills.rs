//! Skill table loading

use super::ConfigError;
use crate::skill::SkillDef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Container for skill definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    #[serde(rename = "skills")]
    pub skills: Vec<SkillDef>,
}

impl SkillsConfig {
    fn into_map(self) -> Result<HashMap<String, SkillDef>, ConfigError> {
        let mut map = HashMap::new();
        for skill in self.skills {
            if map.contains_key(&skill.id) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate skill id '{}'",
                    skill.id
                )));
            }
            map.insert(skill.id.clone(), skill);
        }
        Ok(map)
    }
}

/// Load skill definitions from a TOML file
pub fn load_skill_configs(path: &Path) -> Result<HashMap<String, SkillDef>, ConfigError> {
    let config: SkillsConfig = super::load_toml(path)?;
    config.into_map()
}

/// Load skill definitions from a TOML string
pub fn parse_skill_configs(content: &str) -> Result<HashMap<String, SkillDef>, ConfigError> {
    let config: SkillsConfig = super::parse_toml(content)?;
    config.into_map()
}

/// Check prerequisites point at real skills
pub(super) fn validate_skills(skills: &HashMap<String, SkillDef>) -> Result<(), ConfigError> {
    for skill in skills.values() {
        if skill.sp_cost < 0 {
            return Err(ConfigError::ValidationError(format!(
                "skill '{}' has negative sp_cost",
                skill.id
            )));
        }
        for prereq in &skill.prerequisites {
            if !skills.contains_key(prereq) {
                return Err(ConfigError::ValidationError(format!(
                    "skill '{}' requires unknown skill '{}'",
                    skill.id, prereq
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::{SkillEffect, StatScaling};

    #[test]
    fn test_parse_skills() {
        let toml = r#"
[[skills]]
id = "arc_welder"
name = "Arc Welder"
sp_cost = 4
base_value = 9
stat_scaling = "strength"
scaling_factor = 0.1

[skills.effect]
type = "damage"
"#;

        let skills = parse_skill_configs(toml).unwrap();
        let welder = &skills["arc_welder"];
        assert_eq!(welder.effect, SkillEffect::Damage);
        assert_eq!(welder.stat_scaling, StatScaling::Strength);
        assert!(welder.prerequisites.is_empty());
        assert_eq!(welder.unlock_cost, 1);
        assert!(validate_skills(&skills).is_ok());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let toml = r#"
[[skills]]
id = "zap"
name = "Zap"
sp_cost = 1
base_value = 1
stat_scaling = "none"
effect = { type = "damage" }

[[skills]]
id = "zap"
name = "Zap Again"
sp_cost = 1
base_value = 1
stat_scaling = "none"
effect = { type = "damage" }
"#;
        assert!(matches!(
            parse_skill_configs(toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_unknown_prerequisite_rejected() {
        let toml = r#"
[[skills]]
id = "zap"
name = "Zap"
sp_cost = 1
base_value = 1
stat_scaling = "none"
prerequisites = ["spark"]
effect = { type = "damage" }
"#;
        let skills = parse_skill_configs(toml).unwrap();
        assert!(validate_skills(&skills).is_err());
    }

    #[test]
    fn test_bad_effect_type_is_parse_error() {
        let toml = r#"
[[skills]]
id = "zap"
name = "Zap"
sp_cost = 1
base_value = 1
stat_scaling = "none"
effect = { type = "teleport" }
"#;
        assert!(matches!(
            parse_skill_configs(toml),
            Err(ConfigError::ParseError(_))
        ));
    }
}
