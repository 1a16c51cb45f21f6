//! App Router

use salvo::Router;

use crate::{healthcheck, products};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("api")
                .push(Router::with_path("calculate-value").post(products::calculate::handler))
                .push(Router::with_path("history").get(products::history::handler)),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use testresult::TestResult;

    use appraise_app::context::AppContext;

    use crate::state::State;

    use super::*;

    async fn make_service(dir: &TempDir) -> TestResult<(Service, AppContext)> {
        let url = format!("sqlite://{}", dir.path().join("products.db").display());
        let app = AppContext::from_database_url(&url, 4).await?;

        let service = Service::new(
            Router::new()
                .hoop(inject(State::from_app_context(app.clone())))
                .push(app_router()),
        );

        Ok((service, app))
    }

    async fn history(service: &Service) -> TestResult<Value> {
        let body = TestClient::get("http://example.com/api/history")
            .send(service)
            .await
            .take_json()
            .await?;

        Ok(body)
    }

    #[tokio::test]
    async fn test_calculated_batches_appear_in_history() -> TestResult {
        let dir = TempDir::new()?;
        let (service, app) = make_service(&dir).await?;

        let empty = history(&service).await?;

        assert_eq!(empty["data"], json!({ "history": [], "count": 0 }));

        for batch in [
            json!([{ "name": "First", "price": 10.99, "quality": 5 }]),
            json!([
                { "name": "Second", "price": 20.50, "quality": 8 },
                { "name": "  Third  ", "price": "1.5", "quality": 2 },
            ]),
        ] {
            let res = TestClient::post("http://example.com/api/calculate-value")
                .json(&json!({ "products": batch }))
                .send(&service)
                .await;

            assert_eq!(res.status_code, Some(StatusCode::OK));
        }

        let body = history(&service).await?;
        let names: Vec<&str> = body["data"]["history"]
            .as_array()
            .map(|entries| entries.iter().filter_map(|e| e["name"].as_str()).collect())
            .unwrap_or_default();

        assert_eq!(body["data"]["count"], 3);
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"Third"), "names should be trimmed: {names:?}");
        assert_eq!(names.last(), Some(&"First"), "oldest should be last");
        assert!(
            body["data"]["history"][0].get("id").is_none(),
            "internal ids are not exposed"
        );

        assert_eq!(history(&service).await?, body, "history should be stable");

        app.close().await;

        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_batch_is_not_recorded() -> TestResult {
        let dir = TempDir::new()?;
        let (service, app) = make_service(&dir).await?;

        let res = TestClient::post("http://example.com/api/calculate-value")
            .json(&json!({
                "products": [
                    { "name": "Valid", "price": 1, "quality": 1 },
                    { "name": "Invalid", "price": 1, "quality": 0 },
                ]
            }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(history(&service).await?["data"]["count"], 0);

        app.close().await;

        Ok(())
    }

    #[tokio::test]
    async fn test_closed_store_returns_500() -> TestResult {
        let dir = TempDir::new()?;
        let (service, app) = make_service(&dir).await?;

        app.close().await;

        let res = TestClient::get("http://example.com/api/history")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
