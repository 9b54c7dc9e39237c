//! Zone analytics command: `analytics_get`.

use std::sync::Arc;

use crate::registry::{CommandResult, CommandSpec, ParamKind, ParamSpec};

use super::backend::Analytics;

pub fn commands(analytics: &Arc<dyn Analytics>) -> Vec<CommandSpec> {
    let backend = analytics.clone();
    vec![CommandSpec::new(
        "analytics_get",
        "Fetch analytics for a zone over a time window",
        vec![
            ParamSpec::required("zoneId", ParamKind::String).describe("zone id"),
            ParamSpec::required("since", ParamKind::String).describe("window start"),
            ParamSpec::required("until", ParamKind::String).describe("window end"),
        ],
        move |args| {
            let zone_id = args.str("zoneId")?;
            let since = args.str("since")?;
            let until = args.str("until")?;
            let data = backend.get(zone_id, since, until)?;
            Ok(CommandResult::with_data(data).message(format!(
                "Fetching analytics for zone '{zone_id}' from '{since}' to '{until}'"
            )))
        },
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{DispatchError, Registry, ValidationError};
    use crate::tools::backend::DryRun;
    use serde_json::{Map, Value, json};

    fn registry() -> Registry {
        let analytics: Arc<dyn Analytics> = Arc::new(DryRun);
        let mut reg = Registry::new();
        for spec in commands(&analytics) {
            reg.register(spec).unwrap();
        }
        reg
    }

    fn bag(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn window_bounds_reach_backend() {
        let result = registry()
            .dispatch(
                "analytics_get",
                &bag(json!({"zoneId":"z1","since":"2024-01-01","until":"2024-01-31"})),
            )
            .unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["action"], json!("analytics.get"));
        assert_eq!(data["request"]["since"], json!("2024-01-01"));
        assert_eq!(
            result.message.as_deref(),
            Some("Fetching analytics for zone 'z1' from '2024-01-01' to '2024-01-31'")
        );
    }

    #[test]
    fn all_three_window_params_are_required() {
        let err = registry()
            .dispatch("analytics_get", &bag(json!({"zoneId":"z1","since":"2024-01-01"})))
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Validation(ValidationError::MissingRequired(name)) if name == "until"
        ));
    }
}
