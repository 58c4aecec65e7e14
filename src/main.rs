use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use service_network::api::{self, AppState};
use service_network::catalog;
use service_network::config;
use service_network::generator::{
    generate_preview_packet, generate_welcome_packet, mock_events, render_service_report,
    GenerationContext,
};
use service_network::models::packet::PacketType;
use service_network::notification::compose::{
    compose_preview_email, compose_report_email, SendPreviewPacketRequest,
    SendServiceReportRequest,
};
use service_network::notification::resend::{Mailer, ResendClient};
use service_network::output;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cfg = config::load()?;
    let args = cli::Cli::parse();

    let result = match args.command {
        Some(cli::Commands::Serve { port }) => {
            let port = port.unwrap_or(cfg.port);
            run_server(cfg, port).await
        }
        Some(cli::Commands::Render {
            service,
            email,
            webhook,
            out,
            preview,
            seed,
        }) => handle_render(&service, &email, webhook.as_deref(), &out, preview, seed),
        Some(cli::Commands::Send {
            service,
            to,
            packet_type,
            webhook,
        }) => handle_send(&cfg, &service, &to, &packet_type, webhook.as_deref()).await,
        Some(cli::Commands::Report { service, to }) => handle_report(&cfg, &service, &to).await,
        Some(cli::Commands::Catalog) => {
            print_catalog();
            Ok(())
        }
        None => {
            let port = cfg.port;
            run_server(cfg, port).await
        }
    };

    if let Err(ref e) = result {
        eprintln!("Error: {:?}", e);
    }
    result
}

/// Console logging filtered by RUST_LOG, plus OTLP export when
/// OTEL_EXPORTER_OTLP_ENDPOINT is set.
fn init_tracing() -> anyhow::Result<()> {
    use opentelemetry::KeyValue;
    use opentelemetry_sdk::{trace as sdktrace, Resource};

    let telemetry_layer = if std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").is_ok() {
        let tracer = opentelemetry_otlp::new_pipeline()
            .tracing()
            .with_exporter(opentelemetry_otlp::new_exporter().tonic())
            .with_trace_config(sdktrace::config().with_resource(Resource::new(vec![
                KeyValue::new("service.name", "service-network"),
            ])))
            .install_batch(opentelemetry_sdk::runtime::Tokio)
            .context("failed to install OpenTelemetry tracer")?;
        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "service_network=debug,svcnet=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry_layer)
        .init();
    Ok(())
}

async fn run_server(cfg: config::Config, port: u16) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(cfg)?);
    let app = api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Service Network listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn context_for(seed: Option<u64>) -> GenerationContext {
    match seed {
        Some(seed) => GenerationContext::fixed(Utc::now(), seed),
        None => GenerationContext::system(),
    }
}

fn handle_render(
    service_arg: &str,
    email: &str,
    webhook: Option<&str>,
    out: &std::path::Path,
    preview: bool,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let service = output::load_service(service_arg)?;
    let mut ctx = context_for(seed);

    let written = if preview {
        let packet = generate_preview_packet(&service, email, webhook, &mut ctx);
        output::write_files(out, &packet.files())?
    } else {
        let packet = generate_welcome_packet(&service, email, webhook, &mut ctx);
        let rules = serde_json::to_string_pretty(&packet.field_rules)?;
        let mut files = packet.files();
        files.push(("field-rules.json", rules.as_str()));
        output::write_files(out, &files)?
    };

    println!("Rendered {} documents for '{}':", written.len(), service.name);
    for path in written {
        println!("  {}", path.display());
    }
    Ok(())
}

fn mailer(cfg: &config::Config) -> anyhow::Result<ResendClient> {
    let key = cfg
        .resend_api_key
        .as_deref()
        .context("RESEND_API_KEY is not set")?;
    ResendClient::new(key, cfg.resend_api_url.clone())
}

async fn handle_send(
    cfg: &config::Config,
    service_arg: &str,
    to: &str,
    packet_type: &str,
    webhook: Option<&str>,
) -> anyhow::Result<()> {
    let packet_type: PacketType = packet_type.parse().map_err(anyhow::Error::msg)?;
    let service = output::load_service(service_arg)?;
    let packet = generate_preview_packet(&service, to, webhook, &mut GenerationContext::system());

    let req = SendPreviewPacketRequest::from_packet(to, &service.name, &service.id, packet_type, &packet);
    let email = compose_preview_email(&req, &cfg.resend_from_email)?;
    let message_id = mailer(cfg)?.send(&email).await?;

    println!(
        "Sent {} packet for '{}' to {}\n  Message ID: {}",
        packet_type, service.name, to, message_id
    );
    Ok(())
}

async fn handle_report(cfg: &config::Config, service_arg: &str, to: &str) -> anyhow::Result<()> {
    let service = output::load_service(service_arg)?;
    let mut ctx = GenerationContext::system();
    let events = mock_events(&service, &mut ctx);
    let event = events.first().context("service has no events")?;

    let req = SendServiceReportRequest {
        to: Some(to.to_string()),
        service_name: Some(service.name.clone()),
        service_id: Some(service.id.clone()),
        report_html: Some(render_service_report(&service, event)),
        record_id: Some(event.record_id.clone()),
    };
    let email = compose_report_email(&req, &cfg.resend_from_email, ctx.epoch_millis())?;
    let message_id = mailer(cfg)?.send(&email).await?;

    println!(
        "Sent report for record {} to {}\n  Message ID: {}",
        event.record_id, to, message_id
    );
    Ok(())
}

fn print_catalog() {
    println!("{:<16} {:<22} {:<10} CATEGORIES", "ID", "WORKFLOW", "COST");
    for wf in catalog::workflows() {
        let categories: Vec<&str> = wf.categories.iter().map(|c| c.as_str()).collect();
        println!(
            "{:<16} {:<22} ${:<9.2} {}",
            wf.id,
            wf.name,
            wf.cost_per_run,
            categories.join(",")
        );
    }
    println!();
    println!("{:<26} {:<22} {:<10} WORKFLOWS", "SERVICE", "NAME", "COST");
    for svc in catalog::mock_services() {
        println!(
            "{:<26} {:<22} ${:<9.2} {}",
            svc.id,
            svc.name,
            svc.estimated_cost_per_run,
            svc.workflow_names.join(", ")
        );
    }
}
