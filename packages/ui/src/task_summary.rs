use dioxus::prelude::*;
use api::ApiError;
use store::{TaskStats, TaskStatus};

use crate::icons::{FaCircleCheck, FaClock, FaListCheck, FaSpinner};
use crate::{use_queries, use_task_revision, Icon};

#[derive(Clone, Copy, PartialEq)]
enum Card {
    Total,
    Status(TaskStatus),
}

const CARDS: [(Card, &str); 4] = [
    (Card::Total, "Total Tasks"),
    (Card::Status(TaskStatus::NotStarted), "Not Started"),
    (Card::Status(TaskStatus::InProgress), "In Progress"),
    (Card::Status(TaskStatus::Done), "Completed"),
];

impl Card {
    fn value(&self, stats: &TaskStats) -> u64 {
        match self {
            Self::Total => stats.total,
            Self::Status(status) => stats.by_status.count(*status),
        }
    }

    /// Card text: `...` while loading, `--` after a failed request.
    fn display(&self, stats: Option<&Result<TaskStats, ApiError>>) -> String {
        match stats {
            None => "...".to_string(),
            Some(Ok(stats)) => self.value(stats).to_string(),
            Some(Err(_)) => "--".to_string(),
        }
    }
}

/// Counts per status. Shows `--` in every card when the stats request fails.
#[component]
pub fn TaskSummary() -> Element {
    let queries = use_queries();
    let revision = use_task_revision();

    let stats = use_resource(move || {
        let queries = queries.clone();
        revision.get();
        async move {
            let result = queries.tasks.stats().await;
            if let Err(e) = &result {
                tracing::warn!(error = %e, "failed to load task stats");
            }
            result
        }
    });

    let cards: Vec<(Card, &'static str, String)> = {
        let stats = stats.read();
        CARDS
            .iter()
            .map(|(card, label)| {
                (*card, *label, card.display((*stats).as_ref()))
            })
            .collect()
    };

    rsx! {
        div {
            class: "summary-grid",
            for (card, label, value) in cards {
                div {
                    key: "{label}",
                    class: "summary-card",
                    {card_icon(card)}
                    div {
                        p { class: "summary-value", "{value}" }
                        p { class: "summary-label", "{label}" }
                    }
                }
            }
        }
    }
}

fn card_icon(card: Card) -> Element {
    match card {
        Card::Total => rsx! { Icon { width: 18, height: 18, fill: "currentColor", icon: FaListCheck } },
        Card::Status(TaskStatus::NotStarted) => {
            rsx! { Icon { width: 18, height: 18, fill: "currentColor", icon: FaClock } }
        }
        Card::Status(TaskStatus::InProgress) => {
            rsx! { Icon { width: 18, height: 18, fill: "currentColor", icon: FaSpinner } }
        }
        Card::Status(TaskStatus::Done) => {
            rsx! { Icon { width: 18, height: 18, fill: "currentColor", icon: FaCircleCheck } }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::StatusCounts;

    #[test]
    fn card_text_follows_request_state() {
        let stats = TaskStats {
            total: 4,
            overdue: 0,
            by_status: StatusCounts {
                done: Some(3),
                ..StatusCounts::default()
            },
        };
        let done = Card::Status(TaskStatus::Done);

        assert_eq!(done.display(None), "...");
        assert_eq!(done.display(Some(&Ok(stats.clone()))), "3");
        assert_eq!(Card::Total.display(Some(&Ok(stats))), "4");
        assert_eq!(
            Card::Status(TaskStatus::InProgress).display(Some(&Err(ApiError::network()))),
            "--"
        );
    }
}
