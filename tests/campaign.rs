use std::net::TcpListener;
use std::time::Duration;

use awc::Client;
use fundraising::campaign::validation::Numeric;
use fundraising::{CampaignBody, CreateCampaignBody, DonateBody, MessageBody, Settings};

/// Picks a port that is free right now, so parallel runs do not collide.
fn unused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Polls the api until the spawned server answers.
async fn wait_for_server(client: &Client, base_url: &str) {
    for _ in 0..50 {
        if client
            .get(format!("{}/campaigns", base_url))
            .send()
            .await
            .is_ok()
        {
            return;
        }
        actix_web::rt::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("server at {} did not start", base_url);
}

#[actix_web::test]
#[ignore = "requires a MongoDB server on localhost:27017"]
async fn donations_roll_up_through_live_server() {
    let port = unused_port();
    let settings = Settings {
        bind_address: "127.0.0.1".into(),
        port,
        mongodb_uri: "mongodb://localhost:27017/fundraising_test".into(),
    };
    actix_web::rt::spawn(fundraising::run(settings));

    let base_url = format!("http://127.0.0.1:{}/api", port);
    let client = Client::default();
    wait_for_server(&client, &base_url).await;

    let main: CampaignBody = client
        .post(format!("{}/campaigns", base_url))
        .send_json(&CreateCampaignBody {
            title: Some("The Green Bean Library".into()),
            description: Some("Books for everyone".into()),
            target_amount: Some(Numeric::Number(1000.0)),
            ..Default::default()
        })
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let sub: CampaignBody = client
        .post(format!("{}/campaigns", base_url))
        .send_json(&CreateCampaignBody {
            title: Some("Children's corner".into()),
            description: Some("Picture books".into()),
            target_amount: Some(Numeric::Number(200.0)),
            parent_campaign_id: Some(main.id),
            ..Default::default()
        })
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let donated: CampaignBody = client
        .post(format!("{}/campaigns/{}/donate", base_url, sub.id))
        .send_json(&DonateBody {
            amount: Some(Numeric::Number(50.0)),
        })
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(donated.current_amount, 50.0);

    let parent: CampaignBody = client
        .get(format!("{}/campaigns/{}", base_url, main.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(parent.current_amount, 50.0);
    assert_eq!(parent.created_at, main.created_at);

    let deleted: MessageBody = client
        .delete(format!("{}/campaigns/{}", base_url, main.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(deleted.message, "Campaign deleted successfully");

    let response = client
        .get(format!("{}/campaigns/{}", base_url, sub.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}
