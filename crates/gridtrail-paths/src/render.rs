use crate::topology::Topology;

const EMPTY: char = '·';
const BLOCK: char = '█';
const AGENT: char = 'A';
const GOAL: char = 'G';
const ON_PATH: char = '+';

/// Text dump of a topology and its registered agents.
///
/// One line per row, each cell followed by a space: `·` empty, `█`
/// impassable, `+` on an agent's path, `A` an agent, `G` a goal. Agents are
/// drawn in creation order, so later agents overwrite earlier ones.
pub fn render_text(topology: &Topology) -> String {
    let agents: Vec<_> = topology.agents().collect();
    let width = topology.size_x() as usize;
    let mut out = String::with_capacity((width * 2 + 1) * topology.size_y() as usize);

    for c in topology.bounds() {
        let mut ch = if topology.is_traversable(c) { EMPTY } else { BLOCK };
        for agent in &agents {
            if agent.path().contains(c) {
                ch = ON_PATH;
            }
            if agent.location() == c {
                ch = AGENT;
            }
            if agent.goal() == Some(c) {
                ch = GOAL;
            }
        }
        out.push(ch);
        out.push(' ');
        if c.x == topology.size_x() - 1 {
            out.push('\n');
        }
    }
    out
}
