//! Server-rendered HTML dashboard.
//!
//! One page: a company form, and when a company is submitted the sentiment
//! distribution, per-article summaries, the comparison report, and an inline
//! audio player with a download link. All interpolated text is escaped.

use super::{AppState, CompanyQuery};
use crate::models::{AnalysisReport, Sentiment};
use crate::utils::{file_stem, upcase};
use axum::extract::{Query, State};
use axum::response::Html;
use quick_xml::escape::escape;
use std::sync::Arc;

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CompanyQuery>,
) -> Html<String> {
    // No parameter shows the bare form; a submitted but blank field is an error.
    let body = match query.company.as_deref() {
        None => String::new(),
        Some(input) => match state.pipeline.run(input).await {
            Err(_) => notice("error", "Please enter a company name to proceed."),
            Ok(report) if report.articles.is_empty() => notice(
                "error",
                "No articles found or there was a network issue. Please try another company or retry later.",
            ),
            Ok(report) => render_report(&report),
        },
    };
    Html(render_page(query.company.as_deref().unwrap_or_default(), &body))
}

fn notice(class: &str, message: &str) -> String {
    format!("<p class=\"{}\">{}</p>\n", class, escape(message))
}

fn render_page(company: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Company News Summarizer</title>
</head>
<body>
<h1>Company News Summarization &amp; Sentiment Analysis</h1>
<p>Enter a company name to fetch and analyze recent news articles, see sentiment insights, and get an audio summary.</p>
<form method="get" action="/dashboard">
<input type="text" name="company" placeholder="e.g., Tesla, Infosys, Amazon" value="{}">
<button type="submit">Analyze</button>
</form>
{}</body>
</html>
"#,
        escape(company),
        body
    )
}

fn render_report(report: &AnalysisReport) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<h2>News Coverage Summary for {}</h2>\n",
        escape(&upcase(&report.company))
    ));

    let distribution = &report.comparison.sentiment_distribution;
    let total = distribution.total().max(1);
    html.push_str("<h3>Sentiment Distribution Across Articles</h3>\n<table>\n");
    for sentiment in Sentiment::ALL {
        let count = distribution.get(sentiment);
        let percent = count * 100 / total;
        html.push_str(&format!(
            "<tr><td>{}</td><td><div class=\"bar {}\" style=\"width:{}%\">&nbsp;</div></td><td>{} ({}%)</td></tr>\n",
            sentiment,
            sentiment.as_str().to_lowercase(),
            percent,
            count,
            percent
        ));
    }
    html.push_str("</table>\n");

    html.push_str("<h3>Article Summaries</h3>\n");
    for article in &report.articles {
        html.push_str(&format!(
            "<details>\n<summary>{}</summary>\n<p><strong>Summary:</strong> {}</p>\n<p><strong>Sentiment:</strong> {}</p>\n<p><a href=\"{}\">Read Full Article</a></p>\n</details>\n",
            escape(&article.title),
            escape(&article.summary),
            article.sentiment,
            escape(&article.url)
        ));
    }

    let comparison = &report.comparison;
    html.push_str("<h3>Comparative Analysis Insights</h3>\n");
    html.push_str(&format!(
        "<p><strong>Overall Sentiment Conclusion:</strong> {}</p>\n",
        comparison.overall_conclusion
    ));
    html.push_str(&format!(
        "<p><strong>Topic Overlap:</strong> {}</p>\n",
        escape(&comparison.topic_overlap.common_keywords.join(", "))
    ));
    html.push_str("<ul>\n");
    for diff in &comparison.coverage_differences {
        html.push_str(&format!(
            "<li>{} <em>Impact:</em> {}</li>\n",
            escape(&diff.comparison),
            escape(&diff.impact)
        ));
    }
    html.push_str("</ul>\n");

    html.push_str("<h3>Audio Summary</h3>\n");
    match &report.audio {
        Some(audio) => {
            let src = format!("data:audio/mpeg;base64,{}", audio.to_base64());
            html.push_str(&format!("<audio controls src=\"{}\"></audio>\n", src));
            html.push_str(&format!(
                "<p><a href=\"{}\" download=\"{}_summary.mp3\">Download Audio Report</a></p>\n",
                src,
                escape(&file_stem(&report.company))
            ));
        }
        None => html.push_str(&notice("warning", "Audio generation failed. Please try again.")),
    }
    html
}
