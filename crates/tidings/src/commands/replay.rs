//! `tidings replay`: feed recorded backend events through the reception
//! bridge and show the resulting snapshot.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tabled::Tabled;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use tidings_core::{
    AppStore, Channel, Id, Input, Item, Model, ReceptionBridge, StoreConfig, ToastData, ToastStore,
};

use crate::cli::ReplayArgs;
use crate::commands::Settings;
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ChannelRow {
    #[tabled(rename = "ID")]
    id: Id,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Updated")]
    date: String,
    #[tabled(rename = "Unread")]
    unread: usize,
    #[tabled(rename = "Subscribed")]
    subscribed: String,
}

impl ChannelRow {
    fn new(model: &Model, id: Id, channel: &Channel) -> Self {
        Self {
            id,
            title: channel.title.clone(),
            url: channel.url.clone(),
            date: channel.date.clone(),
            unread: model.unread_count(id),
            subscribed: if channel.subscribed { "yes" } else { "no" }.into(),
        }
    }
}

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "")]
    open: String,
    #[tabled(rename = "ID")]
    id: Id,
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Read")]
    read: String,
}

impl ItemRow {
    fn new(model: &Model, id: Id, item: &Item) -> Self {
        Self {
            open: if model.open_item_id() == Some(id) { "▶" } else { "" }.into(),
            id,
            channel: model
                .channel(item.feed_id)
                .map_or_else(|| item.feed_id.to_string(), |c| c.title.clone()),
            title: item.title.clone(),
            date: item.date.clone(),
            read: if item.read { "✓" } else { "" }.into(),
        }
    }
}

// ── Structured output ───────────────────────────────────────────────

#[derive(Serialize)]
struct ReplaySummary {
    applied: usize,
    skipped: usize,
    open_item: Option<Id>,
    channels: Vec<Input<Channel>>,
    items: Vec<Input<Item>>,
    toast: ToastData,
}

impl ReplaySummary {
    fn new(stats: ReplayStats, model: &Model, toast: &ToastData) -> Self {
        Self {
            applied: stats.applied,
            skipped: stats.skipped,
            open_item: model.open_item_id(),
            channels: model
                .channels_by_date()
                .into_iter()
                .map(|(id, c)| Input::new(id, Channel::clone(c)))
                .collect(),
            items: model
                .items_by_date()
                .into_iter()
                .map(|(id, i)| Input::new(id, Item::clone(i)))
                .collect(),
            toast: toast.clone(),
        }
    }
}

// ── Replay loop ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ReplayStats {
    applied: usize,
    skipped: usize,
}

/// Apply every non-blank line from `reader`. With `strict`, the first
/// undecodable line aborts the replay.
async fn replay_lines<R>(
    reader: R,
    source: &str,
    bridge: &ReceptionBridge,
    strict: bool,
) -> Result<ReplayStats, CliError>
where
    R: AsyncBufRead + Unpin,
{
    let mut stats = ReplayStats::default();
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await.map_err(|source_err| CliError::Io {
        path: source.to_owned(),
        source: source_err,
    })? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match bridge.handle_wire(line) {
            Ok(kind) => {
                tracing::trace!(line = line_no, %kind, "applied");
                stats.applied += 1;
            }
            Err(e) if strict => {
                return Err(CliError::Decode {
                    line: line_no,
                    source: e,
                });
            }
            Err(_) => stats.skipped += 1,
        }
    }
    Ok(stats)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    args: ReplayArgs,
    store_config: &StoreConfig,
    settings: Settings,
) -> Result<(), CliError> {
    let bridge = ReceptionBridge::new(AppStore::new(), ToastStore::from_config(store_config));

    let stats = match args.file.as_deref() {
        Some(path) if path != Path::new("-") => {
            let name = path.display().to_string();
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|source| CliError::Io {
                    path: name.clone(),
                    source,
                })?;
            replay_lines(BufReader::new(file), &name, &bridge, args.strict).await?
        }
        _ => replay_lines(BufReader::new(tokio::io::stdin()), "<stdin>", &bridge, args.strict).await?,
    };
    tracing::info!(applied = stats.applied, skipped = stats.skipped, "replay finished");

    if let Some(id) = args.open {
        bridge.store().open_item(id);
    }

    let model: Arc<Model> = bridge.store().snapshot();
    let toast = bridge.toast().current();
    let summary = ReplaySummary::new(stats, &model, &toast);

    let rendered = if args.items {
        let rows: Vec<ItemRow> = model
            .items_by_date()
            .into_iter()
            .map(|(id, item)| ItemRow::new(&model, id, item))
            .collect();
        output::render(settings.output, &summary, &rows, |r| r.id.to_string())
    } else {
        let rows: Vec<ChannelRow> = model
            .channels_by_date()
            .into_iter()
            .map(|(id, channel)| ChannelRow::new(&model, id, channel))
            .collect();
        output::render(settings.output, &summary, &rows, |r| r.id.to_string())
    };
    output::print_output(&rendered, settings.quiet);
    output::print_toast(&toast, settings.color, settings.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const EVENTS: &str = r#"
{"type":"allChannels","payload":[{"id":1,"url":"https://a","title":"A","date":"2024-01-01","subscribed":true}]}
{"type":"newChannel","payload":{"id":2,"url":"https://b","title":"B","date":"2024-01-02","subscribed":true}}
this is not json
{"type":"newItems","payload":[{"id":10,"feed_id":2,"read":false,"date":"2024-01-02","content":"","title":"hi"}]}
"#;

    fn bridge() -> ReceptionBridge {
        ReceptionBridge::new(AppStore::new(), ToastStore::new())
    }

    #[tokio::test(start_paused = true)]
    async fn lenient_replay_skips_bad_lines() {
        let bridge = bridge();
        let stats = replay_lines(EVENTS.as_bytes(), "test", &bridge, false)
            .await
            .unwrap();

        assert_eq!(stats, ReplayStats { applied: 3, skipped: 1 });
        let model = bridge.store().snapshot();
        assert_eq!(model.channels().len(), 2);
        assert_eq!(model.unread_count(2), 1);
        assert!(bridge.toast().current().error);
    }

    #[tokio::test(start_paused = true)]
    async fn strict_replay_reports_line_number() {
        let err = replay_lines(EVENTS.as_bytes(), "test", &bridge(), true)
            .await
            .unwrap_err();
        // line 1 of the literal is blank
        assert!(matches!(err, CliError::Decode { line: 4, .. }));
    }

    #[test]
    fn summary_lists_newest_first() {
        let store = AppStore::new();
        store.channels_to_state(vec![
            Input::new(1, Channel { url: "u1".into(), title: "old".into(), date: "2023".into(), subscribed: true }),
            Input::new(2, Channel { url: "u2".into(), title: "new".into(), date: "2024".into(), subscribed: false }),
        ]);
        let summary = ReplaySummary::new(ReplayStats::default(), &store.snapshot(), &ToastData::default());

        let ids: Vec<Id> = summary.channels.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
