use crate::manager::TcManager;
use crate::netem::{NetemConfig, TbfConfig};
use crate::TcError;

/// Applies the point-to-point hierarchy to one interface: a root netem
/// qdisc carrying delay/jitter/loss, with a child TBF qdisc for rate
/// limiting (netem has no native rate limiter). Apply is idempotent: the
/// root qdisc is deleted first. On any command failure the root qdisc is
/// rolled back before the error is surfaced (spec §4.6).
pub async fn apply_point_to_point(
    manager: &TcManager,
    namespace: &str,
    interface: &str,
    netem: NetemConfig,
    tbf: TbfConfig,
) -> Result<(), TcError> {
    manager.check_owned(interface)?;
    manager.delete_root_qdisc(namespace, interface).await?;

    if let Err(err) = add_root_netem(manager, namespace, interface, netem).await {
        let _ = manager.delete_root_qdisc(namespace, interface).await;
        return Err(err);
    }

    if let Err(err) = add_child_tbf(manager, namespace, interface, tbf).await {
        let _ = manager.delete_root_qdisc(namespace, interface).await;
        return Err(err);
    }

    Ok(())
}

async fn add_root_netem(manager: &TcManager, namespace: &str, interface: &str, netem: NetemConfig) -> Result<(), TcError> {
    let mut args =
        vec!["qdisc".into(), "add".into(), "dev".into(), interface.into(), "root".into(), "handle".into(), "10:".into(), "netem".into()];

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

    let output = manager.tc(namespace, &args).await?;
    if !output.status.success() {
        return Err(TcManager::classify_failure(&String::from_utf8_lossy(&output.stderr), interface));
    }
    Ok(())
}

async fn add_child_tbf(manager: &TcManager, namespace: &str, interface: &str, tbf: TbfConfig) -> Result<(), TcError> {
    let args = vec![
        "qdisc".into(),
        "add".into(),
        "dev".into(),
        interface.into(),
        "parent".into(),
        "10:".into(),
        "handle".into(),
        "20:".into(),
        "tbf".into(),
        "rate".into(),
        format!("{}bit", tbf.rate_bps),
        "burst".into(),
        format!("{}b", tbf.burst_bytes),
        "latency".into(),
        format!("{}ms", tbf.latency_ms),
    ];

    let output = manager.tc(namespace, &args).await?;
    if !output.status.success() {
        return Err(TcManager::classify_failure(&String::from_utf8_lossy(&output.stderr), interface));
    }
    Ok(())
}
