use super::setup::TestSetup;

impl TestSetup {
    /// Publishes to the setup's room the way the HTTP endpoint does
    pub fn publish(&self, message: &str) -> bool {
        self.room_service
            .publish(&self.room_id, message.to_string())
            .success
    }

    pub fn publish_all(&self, messages: &[&str]) {
        for message in messages {
            assert!(self.publish(message));
        }
    }

    /// Publishes and returns how many mailboxes the message reached
    pub fn publish_counted(&self, message: &str) -> usize {
        self.registry.get(&self.room_id).publish(message.into())
    }
}
