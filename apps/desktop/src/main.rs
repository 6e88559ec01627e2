use anyhow::Result;
use clap::Parser;
use client_core::client::CaseClient;
use client_core::inbox::Inbox;
use client_core::listing::{case_label, display_date, CasePanel, DocumentsView};
use client_core::settings::load_settings;
use client_core::{activity, reports, ActingUser};
use shared::domain::{UserId, UserRole};

#[derive(Parser, Debug)]
struct Args {
    /// Backend URL override on top of client.toml and the environment.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    user_id: i64,
    #[arg(long, default_value = "Staff")]
    role: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.api_base_url = server_url;
    }
    let role = UserRole::parse(&args.role)
        .ok_or_else(|| anyhow::anyhow!("unknown role '{}'", args.role))?;
    let acting = ActingUser {
        user_id: UserId(args.user_id),
        role,
    };
    println!(
        "Connecting to {} as user_id={}",
        settings.api_base_url, acting.user_id.0
    );

    let client = CaseClient::from_settings(&settings)?;
    let documents = client.documents(&acting).await.unwrap_or_else(|err| {
        tracing::warn!("desktop: failed to load documents: {err}");
        Vec::new()
    });
    let users = client.users().await.unwrap_or_else(|err| {
        tracing::warn!("desktop: failed to load users: {err}");
        Vec::new()
    });
    let cases = client.cases().await.unwrap_or_else(|err| {
        tracing::warn!("desktop: failed to load cases: {err}");
        Vec::new()
    });

    let totals = reports::totals(&users, &cases, &documents);
    println!(
        "{} users, {} processing cases, {} archived cases, {} documents on file",
        totals.users, totals.processing_cases, totals.archived_cases, totals.documents_on_file
    );

    let view = DocumentsView::new(documents, users);
    println!("Documents, page {}/{}:", view.page(), view.page_count());
    for doc in view.visible_rows() {
        println!(
            "  #{} {} [{}] submitted by {} on {}",
            doc.doc_id.0,
            doc.doc_name.as_deref().unwrap_or("Untitled"),
            doc.doc_type.as_str(),
            view.submitter_name(doc.doc_submitted_by),
            display_date(doc).unwrap_or("-"),
        );
    }

    let panel = CasePanel::new(cases);
    for case in panel.open_cases() {
        println!("  open: {}", case_label(case));
    }

    let logs = client.user_logs(&acting).await.unwrap_or_else(|err| {
        tracing::warn!("desktop: failed to load activity logs: {err}");
        Vec::new()
    });
    println!("Recent activity:");
    for row in reports::recent_activity(&logs, 5) {
        println!(
            "  {} [{}] {}",
            row.logged_at,
            activity::action_label(Some(row.action.as_str())),
            row.user,
        );
    }

    let notifications = client
        .notifications(acting.user_id)
        .await
        .unwrap_or_else(|err| {
            tracing::warn!("desktop: failed to load notifications: {err}");
            Vec::new()
        });
    let inbox = Inbox::new(notifications);
    println!("{} unread notification(s)", inbox.unread_count());
    for notification in inbox.visible().into_iter().take(5) {
        println!(
            "  {} {}",
            if notification.is_read { " " } else { "*" },
            notification.notification_message.as_deref().unwrap_or(""),
        );
    }

    Ok(())
}
