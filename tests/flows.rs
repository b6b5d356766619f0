//! End-to-end flow runs against mocked upstream services

use apiboard::config::EndpointsConfig;
use apiboard::{ApiboardConfig, Dashboard, FlowId};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dashboard(server: &MockServer) -> Dashboard {
    let config = ApiboardConfig {
        endpoints: EndpointsConfig::rebased(&server.uri()),
        ..Default::default()
    };
    Dashboard::from_config(&config).unwrap()
}

async fn run(dashboard: &Dashboard, id: FlowId, input: &str) -> String {
    dashboard.trigger(id, input).await.unwrap()
}

#[tokio::test]
async fn test_weather_for_madrid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Madrid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "name": "Madrid",
                "latitude": 40.4165,
                "longitude": -3.70256,
                "country": "España",
                "admin1": "Madrid",
                "timezone": "Europe/Madrid"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let times: Vec<String> = (0..24).map(|h| format!("2024-06-01T{h:02}:00")).collect();
    let temps: Vec<f64> = (0..24).map(|h| 15.0 + f64::from(h) * 0.5).collect();
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "40.4165"))
        .and(query_param("longitude", "-3.70256"))
        .and(query_param("current", "temperature_2m"))
        .and(query_param("timezone", "Europe/Madrid"))
        .and(query_param("hourly", "temperature_2m"))
        .and(query_param("forecast_days", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current": { "time": "2024-06-01T12:00", "temperature_2m": 21.3 },
            "hourly": { "time": times, "temperature_2m": temps }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let html = run(&dashboard(&server), FlowId::Weather, "  Madrid ").await;

    assert!(html.contains("<h3>Madrid</h3>"));
    assert!(html.contains("Current: 21.3 °C"));
    assert!(html.contains(">00:00</text>"));
    assert!(html.contains(">12:00</text>"));
    assert!(html.contains(">23:00</text>"));
    assert!(html.contains("Min 15.0°C · Max 26.5°C"));
}

#[tokio::test]
async fn test_weather_unknown_city() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let html = run(&dashboard(&server), FlowId::Weather, "Atlantis").await;
    assert_eq!(html, "City not found.");
}

#[tokio::test]
async fn test_weather_without_current_temperature() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "name": "Lima", "latitude": -12.04, "longitude": -77.03 }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current": { "temperature_2m": "warm" }
        })))
        .mount(&server)
        .await;

    let html = run(&dashboard(&server), FlowId::Weather, "Lima").await;
    assert_eq!(html, "No temperature data.");
}

#[tokio::test]
async fn test_weather_geocoding_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let html = run(&dashboard(&server), FlowId::Weather, "Madrid").await;
    assert_eq!(html, "Error fetching weather.");
}

#[tokio::test]
async fn test_github_unknown_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/no-such-user-xyz"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;

    let html = run(&dashboard(&server), FlowId::Github, "no-such-user-xyz").await;
    assert_eq!(html, "Error fetching user.");
}

#[tokio::test]
async fn test_pokemon_prefix_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/pika"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "results": [
                { "name": "bulbasaur", "url": "" },
                { "name": "pikachu", "url": "" },
                { "name": "pikipek", "url": "" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/pikachu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "pikachu",
            "types": [{ "slot": 1, "type": { "name": "electric", "url": "" } }],
            "sprites": { "front_default": "https://sprites/25.png" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let html = run(&dashboard(&server), FlowId::Pokemon, "  PIKA ").await;
    assert!(html.contains("<p>Name: pikachu</p>"));
    assert!(html.contains("<p>Types: electric</p>"));
}

#[tokio::test]
async fn test_pokemon_without_prefix_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/zzz"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "name": "bulbasaur", "url": "" }]
        })))
        .mount(&server)
        .await;

    let html = run(&dashboard(&server), FlowId::Pokemon, "zzz").await;
    assert_eq!(html, "Pokemon not found.");
}

#[tokio::test]
async fn test_character_matches_nickname() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/es/characters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "fullName": "Harry James Potter",
                "nickname": "Harry",
                "hogwartsHouse": "Gryffindor",
                "interpretedBy": "Daniel Radcliffe",
                "image": "https://img/harry.png"
            },
            {
                "fullName": "Ronald Bilius Weasley",
                "nickname": "Won-Won",
                "hogwartsHouse": "Gryffindor",
                "interpretedBy": "Rupert Grint",
                "image": ""
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let html = run(&dashboard(&server), FlowId::Character, "WON").await;
    assert!(html.contains("Ronald Bilius Weasley"));
    assert!(html.contains("Rupert Grint"));
}

#[tokio::test]
async fn test_cocktail_null_drinks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/json/v1/1/search.php"))
        .and(query_param("s", "nothing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "drinks": null })))
        .mount(&server)
        .await;

    let html = run(&dashboard(&server), FlowId::Cocktail, "nothing").await;
    assert_eq!(html, "No cocktail found.");
}

#[tokio::test]
async fn test_country_population_and_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3.1/name/peru"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "name": { "common": "Peru", "official": "Republic of Peru" },
            "capital": ["Lima"],
            "region": "Americas",
            "population": 32971846,
            "flags": { "png": "https://flagcdn.com/w320/pe.png", "svg": "https://flagcdn.com/pe.svg" }
        }])))
        .mount(&server)
        .await;

    let html = run(&dashboard(&server), FlowId::Country, "peru").await;
    assert!(html.contains("32,971,846"));
    assert!(html.contains("https://flagcdn.com/w320/pe.png"));
}

#[tokio::test]
async fn test_malformed_body_is_reported_as_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/advice"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let html = run(&dashboard(&server), FlowId::Advice, "").await;
    assert_eq!(html, "Error fetching advice.");
}

#[tokio::test]
async fn test_dog_fact_sends_limit_and_quotes_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/facts"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "attributes": { "body": "Dogs have three eyelids." } }]
        })))
        .mount(&server)
        .await;

    let html = run(&dashboard(&server), FlowId::DogFact, "").await;
    assert_eq!(html, "\"Dogs have three eyelids.\"");
}

#[tokio::test]
async fn test_pokemon_listing_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/pika"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let html = run(&dashboard(&server), FlowId::Pokemon, "pika").await;
    assert_eq!(html, "Error fetching pokemon.");
}

#[tokio::test]
async fn test_pokemon_second_lookup_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/pika"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "name": "pikachu", "url": "" }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/pikachu"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let html = run(&dashboard(&server), FlowId::Pokemon, "pika").await;
    assert_eq!(html, "Error fetching pokemon.");
}

#[tokio::test]
async fn test_age_sends_name_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/agify"))
        .and(query_param("name", "michael"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 298219,
            "name": "michael",
            "age": 62
        })))
        .expect(1)
        .mount(&server)
        .await;

    let html = run(&dashboard(&server), FlowId::Age, " michael ").await;
    assert!(html.contains("<p>Name: michael</p>"));
    assert!(html.contains("<p>Age: 62</p>"));
    assert!(html.contains("<p>Count: 298219</p>"));
}

#[tokio::test]
async fn test_dictionary_word_is_a_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/entries/en/serendipity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "word": "serendipity",
            "meanings": [{
                "partOfSpeech": "noun",
                "definitions": [{ "definition": "A combination of events which have come about by chance." }]
            }]
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let html = run(&dashboard(&server), FlowId::Dictionary, "serendipity").await;
    assert!(html.contains("<p>Word: serendipity</p>"));
    assert!(html.contains("<p>Type: noun</p>"));
    assert!(html.contains("<p>A combination of events which have come about by chance.</p>"));
}

#[tokio::test]
async fn test_quote_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/random"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "abc",
            "content": "Well begun is half done.",
            "author": "Aristotle"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let html = run(&dashboard(&server), FlowId::Quote, "").await;
    assert!(html.contains("<p>\"Well begun is half done.\"</p>"));
    assert!(html.contains("<p>- Aristotle</p>"));
}

#[tokio::test]
async fn test_cat_fact_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fact"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fact": "Cats have five toes on their front paws.",
            "length": 40
        })))
        .expect(1)
        .mount(&server)
        .await;

    let html = run(&dashboard(&server), FlowId::CatFact, "").await;
    assert_eq!(html, "\"Cats have five toes on their front paws.\"");
}

#[tokio::test]
async fn test_meal_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/json/v1/1/random.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meals": [{
                "idMeal": "52771",
                "strMeal": "Spicy Arrabiata Penne",
                "strCategory": "Vegetarian",
                "strArea": "Italian",
                "strMealThumb": "https://www.themealdb.com/images/media/meals/penne.jpg"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let html = run(&dashboard(&server), FlowId::Meal, "").await;
    assert!(html.contains("<p>Spicy Arrabiata Penne</p>"));
    assert!(html.contains("<p>Vegetarian · Italian</p>"));
}
