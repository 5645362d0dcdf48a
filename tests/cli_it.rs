// std
use std::io::Write;
// crates.io
use httpmock::prelude::*;
use tempfile::NamedTempFile;
// self
use spark_api::{
	_preludet::*,
	auth::{Credentials, NETBACKS_SCOPE, ROUTES_SCOPE, ScopeSet},
	cli::{self, RunStage},
	client::SparkClient,
	config::SparkConfig,
	http::ReqwestTransportErrorMapper,
};

const CLIENT_ID: &str = "166f3ee3-8a5e-4f36-9d05-0b7ac1c5f5d1";
const CLIENT_SECRET: &str = "2a14d6f0-7c3b-4e58-a1b2-9f8e7d6c5b4a";

fn credentials_file() -> NamedTempFile {
	let mut file = NamedTempFile::new().expect("Temporary credentials file should be created.");

	writeln!(file, "client_id,client_secret\n{CLIENT_ID},{CLIENT_SECRET}")
		.expect("Temporary credentials file should be written.");

	file
}

fn client_for(config: SparkConfig) -> ReqwestTestClient {
	let file = credentials_file();
	let (credentials, _) =
		Credentials::resolve(Some(file.path())).expect("Credentials file should resolve.");

	SparkClient::with_http_client(
		config,
		credentials,
		test_reqwest_http_client(),
		ReqwestTransportErrorMapper,
	)
}

async fn mock_token(server: &MockServer) {
	server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token/");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"accessToken":"tok123456","expiresIn":1799}"#);
		})
		.await;
}

async fn mock_prices(server: &MockServer) {
	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1.0/contracts/");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"data":[{"id":"spark25s","fullName":"Spark25S Pacific 160 TFDE"}]}"#);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1.0/contracts/spark25s/price-releases/latest/");
			then.status(200).header("content-type", "application/json").body(
				r#"{"data":{"releaseDate":"2024-05-01","data":[{"dataPoints":[
					{"deliveryPeriod":{"startAt":"2024-05-01"},
					 "derivedPrices":{"usdPerDay":{"spark":"73250.00"}}}
				]}]}}"#,
			);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v1.0/contracts/spark25s/price-releases/")
				.query_param("limit", "4");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"data":[{"releaseDate":"2024-05-01","data":[{"dataPoints":[]}]}]}"#);
		})
		.await;
}

#[tokio::test]
async fn credentials_file_run_prints_contracts_and_prices() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;
	mock_prices(&server).await;

	let routes_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1.0/routes/");
			then.status(500);
		})
		.await;
	let client = client_for(test_config(&server.base_url()));
	let mut out = Vec::new();

	cli::run(&client, &mut out).await.expect("The run should complete.");

	let output = String::from_utf8(out).expect("Output should be UTF-8.");

	assert!(output.contains("client_id=166f3ee3-8a5e-4f36-9d05-0b7ac1c5f5d1, client_secret=2a14d****"));
	assert!(output.contains("Fetched an access token tok12****, valid 1799 seconds."));
	assert!(output.contains("\nSpark25S Pacific 160 TFDE\n"));
	assert!(output.contains("Spark price usdPerDay=73250 USD for period starting on 2024-05-01"));
	assert!(output.trim_end().ends_with(">>>> Done."));

	routes_mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn routes_scope_adds_route_listing() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;
	mock_prices(&server).await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1.0/routes/");
			then.status(200).header("content-type", "application/json").body(
				r#"{"data":{"routes":[{
					"uuid":"003dec0a-ce8f-41db-8c24-4d7ef6addf70",
					"loadPort":{"name":"Sabine Pass"},
					"dischargePort":{"name":"Futtsu"},
					"via":null
				}],"sparkReleaseDates":["2024-05-01"]}}"#,
			);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v1.0/routes/003dec0a-ce8f-41db-8c24-4d7ef6addf70/")
				.query_param("release-date", "2024-05-01");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"data":{"totalCost":"95000"}}"#);
		})
		.await;

	let config = SparkConfig::builder()
		.base_url(Url::parse(&server.base_url()).expect("Mock server base URL should parse."))
		.scopes(
			ScopeSet::new(["read:lng-freight-prices", ROUTES_SCOPE])
				.expect("Fixture scopes should be valid."),
		)
		.build()
		.expect("Configuration with routes scope should be valid.");
	let client = client_for(config);
	let mut out = Vec::new();

	cli::run(&client, &mut out).await.expect("The run should complete.");

	let output = String::from_utf8(out).expect("Output should be UTF-8.");

	assert!(output.contains("uuid=003dec0a-ce8f-41db-8c24-4d7ef6addf70, Sabine Pass to Futtsu via=-"));
	assert!(output.contains(">>>> Costs for route 003dec0a-ce8f-41db-8c24-4d7ef6addf70 on 2024-05-01"));
	assert!(output.contains("\"totalCost\": \"95000\""));
}

#[tokio::test]
async fn api_failure_reports_last_stage() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1.0/contracts/");
			then.status(503).body("maintenance");
		})
		.await;

	let client = client_for(test_config(&server.base_url()));
	let mut out = Vec::new();
	let failure = cli::run(&client, &mut out).await.expect_err("HTTP 503 should fail the run.");

	assert_eq!(failure.stage, RunStage::TokenAcquired);
	assert!(matches!(failure.error, Error::ApiRequest { status: 503, .. }));
}

#[tokio::test]
async fn failing_contract_stops_remaining_price_requests() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1.0/contracts/");
			then.status(200).header("content-type", "application/json").body(
				r#"{"data":[
					{"id":"spark25s","fullName":"Spark25S Pacific 160 TFDE"},
					{"id":"spark30s","fullName":"Spark30S Atlantic 160 TFDE"}
				]}"#,
			);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1.0/contracts/spark25s/price-releases/latest/");
			then.status(500).body("upstream failure");
		})
		.await;

	let second_latest = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1.0/contracts/spark30s/price-releases/latest/");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"data":{"releaseDate":"2024-05-01","data":[]}}"#);
		})
		.await;
	let client = client_for(test_config(&server.base_url()));
	let mut out = Vec::new();
	let failure = cli::run(&client, &mut out).await.expect_err("HTTP 500 should fail the run.");

	assert_eq!(failure.stage, RunStage::ContractsListed);
	assert!(matches!(failure.error, Error::ApiRequest { status: 500, .. }));

	let output = String::from_utf8(out).expect("Output should be UTF-8.");

	assert!(output.contains("\nSpark30S Atlantic 160 TFDE\n"));
	assert!(!output.contains(">>>> Done."));

	second_latest.assert_calls_async(0).await;
}

#[tokio::test]
async fn exit_status_follows_the_run_outcome() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;
	mock_prices(&server).await;

	let client = client_for(test_config(&server.base_url()));
	let outcome = cli::run(&client, &mut Vec::new()).await;

	assert_eq!(cli::exit_status(&outcome), 0);

	let _ = cli::exit_code(outcome);
	let rejecting = MockServer::start_async().await;

	rejecting
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token/");
			then.status(401).body(r#"{"detail":"invalid client"}"#);
		})
		.await;

	let client = client_for(test_config(&rejecting.base_url()));
	let outcome = cli::run(&client, &mut Vec::new()).await;

	assert_eq!(cli::exit_status(&outcome), 1);
	assert_eq!(
		outcome.as_ref().map_err(|failure| failure.stage).expect_err("401 should fail the run."),
		RunStage::Unauthenticated
	);

	let _ = cli::exit_code(outcome);
}

#[tokio::test]
async fn netbacks_scope_adds_netback_listing() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;
	mock_prices(&server).await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1.0/netbacks/reference-data/");
			then.status(200).header("content-type", "application/json").body(
				r#"{"data":{"staticData":{
					"fobPorts":[
						{"uuid":"0048c3f5","name":"Bonny LNG","availableViaPoints":[]},
						{"uuid":"003f92ce","name":"Sabine Pass","availableViaPoints":["cogh","suez"]}
					],
					"sparkReleases":["2024-05-01","2024-04-30"]
				}}}"#,
			);
		})
		.await;

	let netback = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v1.0/netbacks/")
				.query_param("fob-port", "003f92ce")
				.query_param("release-date", "2024-05-01")
				.query_param("via-point", "cogh");
			then.status(200).header("content-type", "application/json").body(
				r#"{"data":{"name":"Sabine Pass","netbacks":[{
					"load":{"month":"2024-06"},
					"nea":{"outright":{"usdPerMMBtu":"9.715"},"ttfBasis":{"usdPerMMBtu":"-0.350"}},
					"nwe":{"outright":{"usdPerMMBtu":"9.160"},"ttfBasis":{"usdPerMMBtu":"-0.905"}},
					"neaMinusNwe":{"outright":{"usdPerMMBtu":"0.555"},"ttfBasis":{"usdPerMMBtu":"0.555"}}
				}]}}"#,
			);
		})
		.await;
	let config = SparkConfig::builder()
		.base_url(Url::parse(&server.base_url()).expect("Mock server base URL should parse."))
		.scopes(
			ScopeSet::new(["read:lng-freight-prices", NETBACKS_SCOPE])
				.expect("Fixture scopes should be valid."),
		)
		.build()
		.expect("Configuration with netbacks scope should be valid.");
	let client = client_for(config);
	let mut out = Vec::new();

	cli::run(&client, &mut out).await.expect("The run should complete.");

	let output = String::from_utf8(out).expect("Output should be UTF-8.");

	assert!(output.contains("uuid=003f92ce, Sabine Pass via=cogh/suez"));
	assert!(output.contains(">>>> Netbacks for Sabine Pass via cogh"));
	assert!(output.contains(
		"2024-06: NEA 9.715 (TTF basis -0.350), NWE 9.160 (TTF basis -0.905), NEA-NWE 0.555 USD/MMBtu"
	));
	assert!(output.trim_end().ends_with(">>>> Done."));

	netback.assert_calls_async(1).await;
}
