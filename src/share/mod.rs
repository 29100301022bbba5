use crate::api::ApiResult;
use crate::models::{Group, Note, ShareOutcome};
use std::future::Future;

/// Copy `content` into every target group, one independent create call per
/// target, all in flight at once.
///
/// Returns one outcome per distinct target, in target order. Blank content
/// shares nothing.
pub(crate) async fn fan_out<F, Fut>(targets: &[Group], content: &str, post: F) -> Vec<ShareOutcome>
where
    F: Fn(String, String) -> Fut,
    Fut: Future<Output = ApiResult<Note>>,
{
    if content.trim().is_empty() {
        return vec![];
    }

    let mut seen: Vec<&str> = Vec::with_capacity(targets.len());
    let calls = targets
        .iter()
        .filter(|g| {
            if seen.contains(&g.id.as_str()) {
                false
            } else {
                seen.push(&g.id);
                true
            }
        })
        .map(|g| {
            let group_id = g.id.clone();
            let group_name = g.display_name().to_string();
            let call = post(group_id.clone(), content.to_string());
            async move {
                let result = call.await.map_err(|e| {
                    tracing::warn!(%group_id, error = %e, "share target failed");
                    e.to_string()
                });
                ShareOutcome {
                    group_id,
                    group_name,
                    result,
                }
            }
        })
        .collect::<Vec<_>>();

    futures::future::join_all(calls).await
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ShareSummary {
    pub succeeded: Vec<String>,
    /// (group name, error message)
    pub failed: Vec<(String, String)>,
}

impl ShareSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

pub(crate) fn summarize(outcomes: &[ShareOutcome]) -> ShareSummary {
    let mut summary = ShareSummary::default();
    for o in outcomes {
        match &o.result {
            Ok(_) => summary.succeeded.push(o.group_name.clone()),
            Err(e) => summary.failed.push((o.group_name.clone(), e.clone())),
        }
    }
    summary
}

/// Ids of the targets whose copy failed. After a share these are the only ones
/// left selected, so sharing again never duplicates a delivered copy.
pub(crate) fn retry_targets(outcomes: &[ShareOutcome]) -> Vec<String> {
    outcomes
        .iter()
        .filter(|o| !o.is_success())
        .map(|o| o.group_id.clone())
        .collect()
}

/// Groups a note can be shared into: everything except the group it lives in.
pub(crate) fn share_targets(roster: &[Group], source_group_id: &str) -> Vec<Group> {
    roster
        .iter()
        .filter(|g| g.id != source_group_id)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::models::GroupColor;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    fn group(id: &str) -> Group {
        Group {
            id: id.to_string(),
            name: format!("Group {id}"),
            color: GroupColor::Pink,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn created(group_id: &str, content: &str) -> Note {
        Note {
            id: format!("n-{group_id}"),
            group_id: group_id.to_string(),
            content: content.to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_reports_each_target_separately() {
        let targets = vec![group("a"), group("b"), group("c")];
        let outcomes = block_on(fan_out(&targets, "hello", |gid, content| async move {
            if gid == "b" {
                Err(ApiError::Network("connection reset".to_string()))
            } else {
                Ok(created(&gid, &content))
            }
        }));

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_success());
        assert!(!outcomes[1].is_success());
        assert!(outcomes[2].is_success());
        assert_eq!(outcomes[2].result.as_ref().map(|n| n.group_id.as_str()), Ok("c"));

        let summary = summarize(&outcomes);
        assert_eq!(
            summary.succeeded,
            vec!["Group a".to_string(), "Group c".to_string()]
        );
        assert_eq!(
            summary.failed,
            vec![("Group b".to_string(), "connection reset".to_string())]
        );
        assert!(!summary.all_succeeded());
    }

    #[test]
    fn test_blank_content_issues_no_calls() {
        let calls = RefCell::new(0);
        let outcomes = block_on(fan_out(&[group("a")], "  \n", |gid, content| {
            *calls.borrow_mut() += 1;
            async move { Ok::<_, ApiError>(created(&gid, &content)) }
        }));
        assert!(outcomes.is_empty());
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_duplicate_targets_are_posted_once() {
        let calls = RefCell::new(Vec::new());
        let outcomes = block_on(fan_out(
            &[group("a"), group("a"), group("b")],
            "x",
            |gid, content| {
                calls.borrow_mut().push(gid.clone());
                async move { Ok::<_, ApiError>(created(&gid, &content)) }
            },
        ));
        assert_eq!(outcomes.len(), 2);
        assert_eq!(*calls.borrow(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_resharing_only_reaches_failed_targets() {
        let targets = vec![group("a"), group("b"), group("c")];
        let first = block_on(fan_out(&targets, "hello", |gid, content| async move {
            if gid == "b" {
                Err(ApiError::Network("timeout".to_string()))
            } else {
                Ok(created(&gid, &content))
            }
        }));
        let again = retry_targets(&first);
        assert_eq!(again, vec!["b".to_string()]);

        let calls = RefCell::new(Vec::new());
        let retry: Vec<Group> = targets
            .into_iter()
            .filter(|g| again.contains(&g.id))
            .collect();
        let second = block_on(fan_out(&retry, "hello", |gid, content| {
            calls.borrow_mut().push(gid.clone());
            async move { Ok::<_, ApiError>(created(&gid, &content)) }
        }));
        assert_eq!(*calls.borrow(), vec!["b".to_string()]);
        assert!(retry_targets(&second).is_empty());
    }

    #[test]
    fn test_share_targets_exclude_source_group() {
        let roster = vec![group("a"), group("b")];
        let targets = share_targets(&roster, "a");
        assert_eq!(targets, vec![group("b")]);
    }
}
