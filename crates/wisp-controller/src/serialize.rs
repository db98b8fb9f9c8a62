//! Serialization of accumulated events into the output container.

use wisp_core::Event;
use wisp_engine::Weighter;
use wisp_output::{Attr, Group};

use crate::progress::ProgressSink;

/// Build the output container for `events`.
///
/// Layout: root attribute `num_events`; per event a group `event<i>`
/// with `event_weight` and `num_interactions`; per interaction a group
/// `interaction<j>` carrying the signature as string attributes and the
/// kinematics as float datasets. The `target_momentum` dataset is
/// populated with the primary-momentum values, a fixed behavior of the
/// historical format that readers depend on.
pub fn build_container(
    events: &[Event],
    weighter: &dyn Weighter,
    progress: &mut dyn ProgressSink,
) -> Group {
    let mut root = Group::new();
    root.set_attr("num_events", Attr::U64(events.len() as u64));

    for (ie, event) in events.iter().enumerate() {
        progress.status(&format!("saving event {ie}/{}", events.len()));
        let event_group = root.require_group(format!("event{ie}"));
        event_group.set_attr("event_weight", Attr::F64(weighter.event_weight(event)));
        event_group.set_attr("num_interactions", Attr::U64(event.tree.len() as u64));

        for (id, record) in event.tree.iter().enumerate() {
            let interaction = event_group.require_group(format!("interaction{id}"));

            interaction.set_attr(
                "primary_type",
                Attr::Str(record.signature.primary_type.to_string()),
            );
            interaction.set_attr(
                "target_type",
                Attr::Str(record.signature.target_type.to_string()),
            );
            for (isec, secondary) in record.signature.secondary_types.iter().enumerate() {
                interaction.set_attr(
                    format!("secondary_type{isec}"),
                    Attr::Str(secondary.to_string()),
                );
            }

            interaction.set_dataset("vertex", record.vertex.0.to_vec());
            interaction.set_dataset("primary_momentum", record.primary_momentum.0.to_vec());
            interaction.set_dataset("target_momentum", record.primary_momentum.0.to_vec());
            for (isec, momentum) in record.secondary_momenta.iter().enumerate() {
                interaction.set_dataset(format!("secondary_momentum{isec}"), momentum.0.to_vec());
            }
        }
    }

    progress.finish();
    root
}
