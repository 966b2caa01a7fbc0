use std::time::Duration;

use reqwest::blocking::Client;
use scraper::{Html, Selector};

use super::adapter::SearchBackend;
use crate::errors::{CampoError, Result};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";
const NO_RESULTS: &str = "No good DuckDuckGo Search Result was found";

/// Searches the DuckDuckGo HTML endpoint and flattens the hits into text.
pub struct DuckDuckGoSearch {
    client: Client,
    endpoint: String,
    max_results: usize,
    result: Selector,
    link: Selector,
    snippet: Selector,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| CampoError::Config(format!("bad selector {}: {}", css, e)))
}

impl DuckDuckGoSearch {
    pub fn new(endpoint: impl Into<String>, max_results: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            max_results,
            result: selector(".result")?,
            link: selector(".result__a")?,
            snippet: selector(".result__snippet")?,
        })
    }

    fn parse(&self, html: &str) -> String {
        let document = Html::parse_document(html);

        let hits: Vec<String> = document
            .select(&self.result)
            .take(self.max_results)
            .filter_map(|element| {
                let title = element
                    .select(&self.link)
                    .next()
                    .map(|el| el.text().collect::<String>())
                    .unwrap_or_default();
                let snippet = element
                    .select(&self.snippet)
                    .next()
                    .map(|el| el.text().collect::<String>())
                    .unwrap_or_default();

                match (title.trim(), snippet.trim()) {
                    ("", "") => None,
                    (title, "") => Some(title.to_string()),
                    ("", snippet) => Some(snippet.to_string()),
                    (title, snippet) => Some(format!("{}: {}", title, snippet)),
                }
            })
            .collect();

        if hits.is_empty() {
            NO_RESULTS.to_string()
        } else {
            hits.join("\n")
        }
    }
}

impl SearchBackend for DuckDuckGoSearch {
    fn run(&self, query: &str) -> Result<String> {
        let url = format!("{}?q={}", self.endpoint, urlencoding::encode(query));
        let response = self.client.get(&url).send()?;

        if !response.status().is_success() {
            return Err(CampoError::Provider {
                status: response.status().as_u16(),
                body: format!("DuckDuckGo returned status {}", response.status()),
            });
        }

        let html = response.text()?;
        Ok(self.parse(&html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const PAGE: &str = r#"
        <html><body>
          <div class="result">
            <a class="result__a" href="https://example.org/a">Lluvias en Antioquia</a>
            <a class="result__snippet">Cultivos de café afectados por inundaciones.</a>
          </div>
          <div class="result">
            <a class="result__a" href="https://example.org/b">IDEAM alerta roja</a>
            <a class="result__snippet">  Ríos desbordados en el norte.  </a>
          </div>
          <div class="result">
            <a class="result__a" href="https://example.org/c">Third</a>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_limits_and_flattens() {
        let search = DuckDuckGoSearch::new("http://unused", 2).unwrap();
        let text = search.parse(PAGE);
        assert_eq!(
            text,
            "Lluvias en Antioquia: Cultivos de café afectados por inundaciones.\nIDEAM alerta roja: Ríos desbordados en el norte."
        );
    }

    #[test]
    fn test_parse_empty_page() {
        let search = DuckDuckGoSearch::new("http://unused", 5).unwrap();
        assert_eq!(search.parse("<html></html>"), NO_RESULTS);
    }

    #[test]
    fn test_run_against_endpoint() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/html/")
            .match_query(Matcher::UrlEncoded("q".into(), "inundación Colombia".into()))
            .with_status(200)
            .with_body(PAGE)
            .expect(1)
            .create();

        let search = DuckDuckGoSearch::new(format!("{}/html/", server.url()), 5).unwrap();
        let text = search.run("inundación Colombia").unwrap();

        assert!(text.contains("Third"));
        mock.assert();
    }

    #[test]
    fn test_run_non_success() {
        let mut server = Server::new();
        server
            .mock("GET", "/blocked/")
            .match_query(Matcher::Any)
            .with_status(403)
            .create();

        let search = DuckDuckGoSearch::new(format!("{}/blocked/", server.url()), 5).unwrap();
        assert!(matches!(
            search.run("x"),
            Err(CampoError::Provider { status: 403, .. })
        ));
    }
}
