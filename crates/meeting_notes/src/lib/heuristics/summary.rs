pub fn compose_summary(action_item_count: usize) -> String {
    format!("Meeting assigned {action_item_count} tasks with specific deadlines and priorities.")
}
