use crate::manager::TcManager;
use crate::netem::{HtbConfig, NetemConfig};
use crate::TcError;

/// Rate used for HTB classes documented as "unlimited": the parent 1:1
/// class and the broadcast-default 1:99 class never actually constrain
/// traffic, they just need a rate HTB will accept.
const UNLIMITED_BPS: u64 = 10_000_000_000;

/// One per-destination leaf in the shared-bridge hierarchy: the class id
/// (10, 20, ... reserved up to 99 for the broadcast default), destination
/// IP matched by the flower filter, and the HTB/netem parameters for that
/// destination.
#[derive(Debug, Clone)]
pub struct BridgeDestination {
    pub class_id: u32,
    pub dest_ip: String,
    pub htb: HtbConfig,
    pub netem: NetemConfig,
}

/// Builds the numbered destinations for one interface's set of known
/// peers, reserving class `99` for the broadcast/unmatched default.
pub fn assign_class_ids(dest_ips: impl IntoIterator<Item = String>, htb_netem: impl Fn(&str) -> (HtbConfig, NetemConfig)) -> Vec<BridgeDestination> {
    dest_ips
        .into_iter()
        .enumerate()
        .map(|(i, dest_ip)| {
            let class_id = 10 + (i as u32) * 10;
            let (htb, netem) = htb_netem(&dest_ip);
            BridgeDestination { class_id, dest_ip, htb, netem }
        })
        .collect()
}

/// Applies the shared-bridge HTB+flower hierarchy to one interface: a root
/// HTB qdisc defaulting to the broadcast class, an unlimited parent class,
/// one child HTB+netem class per destination with a flower filter, and a
/// broadcast-default class for anything unmatched. Idempotent and rolled
/// back to a clean root qdisc on any failure (spec §4.6).
pub async fn apply_shared_bridge(
    manager: &TcManager,
    namespace: &str,
    interface: &str,
    broadcast_default: NetemConfig,
    destinations: &[BridgeDestination],
) -> Result<(), TcError> {
    manager.check_owned(interface)?;
    manager.delete_root_qdisc(namespace, interface).await?;

    if let Err(err) = build_hierarchy(manager, namespace, interface, broadcast_default, destinations).await {
        let _ = manager.delete_root_qdisc(namespace, interface).await;
        return Err(err);
    }
    Ok(())
}

async fn build_hierarchy(
    manager: &TcManager,
    namespace: &str,
    interface: &str,
    broadcast_default: NetemConfig,
    destinations: &[BridgeDestination],
) -> Result<(), TcError> {
    run_tc(manager, namespace, interface, &["qdisc", "add", "dev", interface, "root", "handle", "1:", "htb", "default", "99"]).await?;

    run_tc(
        manager,
        namespace,
        interface,
        &[
            "class",
            "add",
            "dev",
            interface,
            "parent",
            "1:",
            "classid",
            "1:1",
            "htb",
            "rate",
            &format!("{UNLIMITED_BPS}bit"),
            "ceil",
            &format!("{UNLIMITED_BPS}bit"),
        ],
    )
    .await?;

    for dest in destinations {
        add_destination_class(manager, namespace, interface, dest).await?;
        add_destination_filter(manager, namespace, interface, dest).await?;
    }

    add_broadcast_default(manager, namespace, interface, broadcast_default).await?;

    Ok(())
}

async fn add_destination_class(manager: &TcManager, namespace: &str, interface: &str, dest: &BridgeDestination) -> Result<(), TcError> {
    let classid = format!("1:{}", dest.class_id);
    run_tc(
        manager,
        namespace,
        interface,
        &[
            "class",
            "add",
            "dev",
            interface,
            "parent",
            "1:1",
            "classid",
            &classid,
            "htb",
            "rate",
            &format!("{}bit", dest.htb.rate_bps),
            "ceil",
            &format!("{}bit", dest.htb.ceil_bps),
        ],
    )
    .await?;

    let handle = format!("{}0:", dest.class_id);
    let mut netem_args = vec!["qdisc".to_string(), "add".into(), "dev".into(), interface.into(), "parent".into(), classid, "handle".into(), handle, "netem".into()];
    append_netem_args(&mut netem_args, dest.netem);
    run_tc(manager, namespace, interface, &netem_args.iter().map(String::as_str).collect::<Vec<_>>()).await
}

async fn add_destination_filter(manager: &TcManager, namespace: &str, interface: &str, dest: &BridgeDestination) -> Result<(), TcError> {
    let flowid = format!("1:{}", dest.class_id);
    run_tc(
        manager,
        namespace,
        interface,
        &[
            "filter", "add", "dev", interface, "parent", "1:0", "protocol", "ip", "flower", "dst_ip", &dest.dest_ip, "flowid", &flowid,
        ],
    )
    .await
}

async fn add_broadcast_default(manager: &TcManager, namespace: &str, interface: &str, netem: NetemConfig) -> Result<(), TcError> {
    run_tc(
        manager,
        namespace,
        interface,
        &[
            "class",
            "add",
            "dev",
            interface,
            "parent",
            "1:1",
            "classid",
            "1:99",
            "htb",
            "rate",
            &format!("{UNLIMITED_BPS}bit"),
            "ceil",
            &format!("{UNLIMITED_BPS}bit"),
        ],
    )
    .await?;

    let mut netem_args = vec!["qdisc".to_string(), "add".into(), "dev".into(), interface.into(), "parent".into(), "1:99".into(), "handle".into(), "990:".into(), "netem".into()];
    append_netem_args(&mut netem_args, netem);
    run_tc(manager, namespace, interface, &netem_args.iter().map(String::as_str).collect::<Vec<_>>()).await
}

fn append_netem_args(args: &mut Vec<String>, netem: NetemConfig) {
    if netem.delay_us > 0 {
        args.push("delay".into());
        args.push(format!("{}us", netem.delay_us));
        if netem.jitter_us > 0 {
            args.push(format!("{}us", netem.jitter_us));
        }
    }
    if netem.loss_percent > 0.0 {
        args.push("loss".into());
        args.push(format!("{}%", netem.loss_percent));
    }
}

async fn run_tc(manager: &TcManager, namespace: &str, interface: &str, args: &[&str]) -> Result<(), TcError> {
    let owned: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let output = manager.tc(namespace, &owned).await?;
    if !output.status.success() {
        return Err(TcManager::classify_failure(&String::from_utf8_lossy(&output.stderr), interface));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netem::HtbConfig;

    #[test]
    fn class_ids_are_assigned_in_tens_starting_at_ten() {
        let destinations = assign_class_ids(
            vec!["10.0.0.2".to_string(), "10.0.0.3".to_string(), "10.0.0.4".to_string()],
            |_| (HtbConfig::from_rate_mbps(10.0), NetemConfig { delay_us: 0, jitter_us: 0, loss_percent: 0.0 }),
        );
        let ids: Vec<u32> = destinations.iter().map(|d| d.class_id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }
}
