//! Integration tests: CAP negotiation of draft/relaymsg.

mod common;

use common::TestNetwork;
use relaymsg_proto::{Command, Message};

fn cap_params(msg: &Message) -> Vec<String> {
    match &msg.command {
        Command::Raw(name, params) if name == "CAP" => params.clone(),
        other => panic!("expected CAP reply, got {other:?}"),
    }
}

#[tokio::test]
async fn cap_ls_302_advertises_value() -> anyhow::Result<()> {
    let net = TestNetwork::new();
    let mut client = net.connect("bridge", &[], &[]);

    net.send(&mut client, "CAP LS 302").await?;

    let got = client.drain();
    assert_eq!(got.len(), 1);
    let params = cap_params(&got[0]);
    assert_eq!(params[0], "bridge");
    assert_eq!(params[1], "LS");
    let tokens: Vec<&str> = params[2].split(' ').collect();
    assert!(tokens.contains(&"draft/relaymsg=/"));
    assert!(tokens.contains(&"message-tags"));
    Ok(())
}

#[tokio::test]
async fn cap_ls_301_advertises_bare_name() -> anyhow::Result<()> {
    let net = TestNetwork::new();
    let mut client = net.connect("bridge", &[], &[]);

    net.send(&mut client, "CAP LS").await?;

    let params = cap_params(&client.drain()[0]);
    let tokens: Vec<&str> = params[2].split(' ').collect();
    assert!(tokens.contains(&"draft/relaymsg"));
    assert!(!tokens.iter().any(|t| t.contains('=')));
    Ok(())
}

#[tokio::test]
async fn cap_req_enables_relaymsg() -> anyhow::Result<()> {
    let net = TestNetwork::new();
    let mut bridge = net.connect("bridge", &[], &["relaymsg"]);
    let mut peer = net.link("002", "server2.test");
    net.join("#chat", &bridge).await;

    net.send(&mut bridge, "RELAYMSG #chat alice/web :before").await?;
    assert!(bridge.drain().is_empty());

    net.send(&mut bridge, "CAP REQ :draft/relaymsg message-tags").await?;
    let ack = cap_params(&bridge.drain()[0]);
    assert_eq!(ack[1], "ACK");
    assert_eq!(ack[2], "draft/relaymsg message-tags");

    net.send(&mut bridge, "RELAYMSG #chat alice/web :after").await?;
    let got = bridge.drain();
    let echoed = got
        .iter()
        .find(|m| matches!(m.command, Command::PRIVMSG(..)))
        .expect("relayed line echoed to bridge");
    assert_eq!(echoed.tag_value("draft/relaymsg"), Some("bridge"));
    assert!(echoed.msgid().is_some());
    assert_eq!(peer.drain().len(), 1);
    Ok(())
}

#[tokio::test]
async fn cap_req_with_unknown_cap_is_refused_whole() -> anyhow::Result<()> {
    let net = TestNetwork::new();
    let mut client = net.connect("bridge", &[], &[]);

    net.send(&mut client, "CAP REQ :draft/relaymsg sasl").await?;

    let params = cap_params(&client.drain()[0]);
    assert_eq!(params[1], "NAK");
    assert!(!client.state.has_cap("draft/relaymsg"));

    net.send(&mut client, "CAP LIST").await?;
    let params = cap_params(&client.drain()[0]);
    assert_eq!(params[1], "LIST");
    assert_eq!(params[2], "");
    Ok(())
}

#[tokio::test]
async fn cap_req_minus_disables() -> anyhow::Result<()> {
    let net = TestNetwork::new();
    let mut client = net.connect("bridge", &["draft/relaymsg", "server-time"], &[]);

    net.send(&mut client, "CAP REQ :-draft/relaymsg").await?;
    client.drain();

    assert!(!client.state.has_cap("draft/relaymsg"));
    assert!(client.state.has_cap("server-time"));
    let user = net.matrix.user_manager.get(&client.uid).expect("user registered");
    assert!(!user.read().await.caps.contains("draft/relaymsg"));
    Ok(())
}

#[tokio::test]
async fn cap_without_subcommand_gets_461() -> anyhow::Result<()> {
    let net = TestNetwork::new();
    let mut client = net.connect("bridge", &[], &[]);

    net.send(&mut client, "CAP").await?;

    assert_eq!(
        client.drain_lines(),
        vec![":irc.test 461 bridge CAP :Not enough parameters\r\n".to_string()]
    );
    Ok(())
}
