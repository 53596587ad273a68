//! One-shot provider availability check

use tokio_util::sync::CancellationToken;

use crate::domain::ai::ProviderAvailability;

pub async fn run() -> anyhow::Result<()> {
    let config = super::load_config();
    let service = crate::create_strategy_service(&config.ai);

    let cancel = CancellationToken::new();
    let report = service.provider_availability(&cancel).await;

    print!("{}", render(&report));

    Ok(())
}

fn render(report: &[ProviderAvailability]) -> String {
    let mut out = String::new();

    for entry in report {
        let status = if entry.available { "available" } else { "unavailable" };
        out.push_str(&format!("{:<12} {}\n", entry.provider_name, status));
    }

    let any = report.iter().any(|entry| entry.available);
    out.push_str(&format!(
        "AI service: {}\n",
        if any { "Available" } else { "Unavailable" }
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_each_provider() {
        let report = vec![
            ProviderAvailability {
                provider_name: "OpenAI".to_string(),
                available: false,
            },
            ProviderAvailability {
                provider_name: "Mock".to_string(),
                available: true,
            },
        ];

        let out = render(&report);
        assert!(out.contains("OpenAI       unavailable"));
        assert!(out.contains("Mock         available"));
        assert!(out.ends_with("AI service: Available\n"));
    }

    #[test]
    fn test_render_empty_report_is_unavailable() {
        assert_eq!(render(&[]), "AI service: Unavailable\n");
    }
}
