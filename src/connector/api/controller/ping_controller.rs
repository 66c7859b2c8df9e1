use anyhow::Result;

use super::super::Container;

pub struct PingController<'a> {
    container: &'a Container,
}

impl<'a> PingController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ping(&self) -> Result<String> {
        let uptime = self.container.started_at().elapsed().as_secs();
        Ok(format!(
            "Pong! 🏓\nRelay uptime: {}h {}m {}s",
            uptime / 3600,
            (uptime % 3600) / 60,
            uptime % 60
        ))
    }
}
