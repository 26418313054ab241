use clap::Parser;
use marketdesk_core::dashboard::Dashboard;
use marketdesk_core::domain::Domain;
use marketdesk_core::store::{DataSource, RequestStatus};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "marketdesk_worker")]
struct Args {
    /// Comma-separated domains to refresh (default: all).
    #[arg(long)]
    domains: Option<String>,

    /// Request AI board commentary after the data refresh.
    #[arg(long)]
    analyze: bool,

    /// Commentary language (default: DASHBOARD_LANGUAGE, then "en").
    #[arg(long)]
    language: Option<String>,

    /// Pretty-print the dashboard JSON written to stdout.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = marketdesk_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let domains = parse_domains(args.domains.as_deref());
    let language = args
        .language
        .unwrap_or_else(|| settings.default_language().to_string());

    let dashboard = Dashboard::from_settings(&settings)?;

    for domain in &domains {
        dashboard.refresh_domain(*domain).await;
        log_refresh_outcome(&dashboard, *domain).await?;
    }

    if args.analyze {
        for domain in &domains {
            dashboard.analyze_domain(*domain, &language).await;
            log_analysis_outcome(&dashboard, *domain).await?;
        }
    }

    let mut out = serde_json::Map::new();
    for domain in &domains {
        match dashboard.view_domain(*domain).await {
            Ok(view) => {
                out.insert(domain.as_str().to_string(), view);
            }
            Err(err) => {
                sentry_anyhow::capture_anyhow(&err);
                return Err(err);
            }
        }
    }

    let out = serde_json::Value::Object(out);
    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{out}");
    }

    Ok(())
}

fn parse_domains(arg: Option<&str>) -> Vec<Domain> {
    let Some(arg) = arg else {
        return Domain::ALL.to_vec();
    };

    let mut out = Vec::new();
    for part in arg.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.parse::<Domain>() {
            Ok(d) => {
                if !out.contains(&d) {
                    out.push(d);
                }
            }
            Err(err) => tracing::warn!(%err, "skipping unknown domain"),
        }
    }

    if out.is_empty() {
        out.extend(Domain::ALL);
    }
    out
}

async fn log_refresh_outcome(dashboard: &Dashboard, domain: Domain) -> anyhow::Result<()> {
    let view = dashboard.view_domain(domain).await?;
    let source = view
        .get("snapshot")
        .and_then(|s| s.get("source"))
        .cloned()
        .unwrap_or(serde_json::Value::Null);

    if source == serde_json::json!(DataSource::Fallback) {
        tracing::warn!(%domain, "refresh fell back to synthesized data");
    } else {
        tracing::info!(%domain, "refresh published live data");
    }
    Ok(())
}

async fn log_analysis_outcome(dashboard: &Dashboard, domain: Domain) -> anyhow::Result<()> {
    let view = dashboard.view_domain(domain).await?;
    let status = view.get("status").cloned().unwrap_or(serde_json::Value::Null);

    if status == serde_json::json!(RequestStatus::Error) {
        let message = view
            .get("error_message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error");
        tracing::warn!(%domain, message, "analysis request failed");
    } else {
        tracing::info!(%domain, "analysis ready");
    }
    Ok(())
}

fn init_sentry(settings: &marketdesk_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
