use social_graph_core::{SocialGraph, Weight};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let user_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(100_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: social-graph-bench [mode] [user_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  scalefree   Preferential attachment (popular users gain friends faster)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random friendships");
        println!("  barbell     Two dense communities joined by a thin bridge");
        println!();
        println!("Default user_count: 100000");
        println!("Set RUST_LOG=debug to see engine events on stderr.");
        return;
    }

    if user_count < 20 {
        eprintln!("user_count must be at least 20");
        return;
    }

    println!("social-graph-bench");
    println!("==================");
    println!();

    let generators: Vec<(&str, fn(u64) -> SocialGraph)> = match mode {
        "scalefree" => vec![("Scale-free (preferential attachment)", gen_scale_free)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (community-bridge-community)", gen_barbell)],
        "all" => vec![
            ("Scale-free (preferential attachment)", gen_scale_free as fn(u64) -> SocialGraph),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (community-bridge-community)", gen_barbell),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, user_count);
    }
}

fn run_benchmark(name: &str, generator: fn(u64) -> SocialGraph, user_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} users", user_count);

    let t = Instant::now();
    let mut graph = generator(user_count);
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s: {} users, {} friendships",
        gen_time.as_secs_f64(),
        graph.user_count(),
        graph.edge_count(),
    );

    let first = user(0);
    let last = user(user_count - 1);
    let middle = user(user_count / 2);

    println!();
    let t = Instant::now();
    let path = graph.shortest_path(&first, &last);
    let elapsed = t.elapsed();
    match path {
        Ok(p) => println!(
            "{:<24} {} -> {}: cost {}, {} hops in {}",
            "shortest_path",
            first,
            last,
            p.cost,
            p.hops(),
            ms(elapsed)
        ),
        Err(e) => println!("{:<24} {} -> {}: {} ({})", "shortest_path", first, last, e, ms(elapsed)),
    }

    let t = Instant::now();
    let mutual = graph.mutual_friends(&first, &middle).map(|m| m.len());
    println!(
        "{:<24} {} & {}: {:?} in {}",
        "mutual_friends",
        first,
        middle,
        mutual,
        ms(t.elapsed())
    );

    let hub = graph
        .degree_ranking(1)
        .into_iter()
        .next()
        .map(|d| (d.user, d.degree));
    let Some((hub, degree)) = hub else {
        println!();
        return;
    };

    let t = Instant::now();
    let suggested = graph.suggested_friends(&hub).map(|s| s.len());
    println!(
        "{:<24} {} (degree {}): {:?} in {}",
        "suggested_friends",
        hub,
        degree,
        suggested,
        ms(t.elapsed())
    );

    let edges_before = graph.edge_count();
    let t = Instant::now();
    let removed = graph.remove_user(&hub);
    let elapsed = t.elapsed();
    println!(
        "{:<24} {}: {:?}, {} friendships cascaded in {}",
        "remove_user",
        hub,
        removed,
        edges_before - graph.edge_count(),
        ms(elapsed)
    );
    println!();
}

fn ms(d: Duration) -> String {
    format!("{:.3}ms", d.as_secs_f64() * 1000.0)
}

fn user(i: u64) -> String {
    format!("u{}", i)
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded. Friendships the store rejects
// (duplicates, self-loops) are skipped.
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
    fn weight(&mut self) -> Weight {
        1 + self.next(5) as Weight
    }
}

fn with_users(user_count: u64) -> SocialGraph {
    let mut graph = SocialGraph::with_capacity(user_count as usize);
    for i in 0..user_count {
        graph.add_user(user(i)).expect("bench user ids are unique");
    }
    graph
}

/// Returns true if the friendship was created.
fn befriend(graph: &mut SocialGraph, a: u64, b: u64, weight: Weight) -> bool {
    graph.add_friendship(&user(a), &user(b), weight).is_ok()
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Each new user befriends endpoints of random existing friendships, so
/// users with many friends are more likely to be picked.
fn gen_scale_free(user_count: u64) -> SocialGraph {
    let friends_per_user = 5u64;
    let mut graph = with_users(user_count);
    let mut rng = FastRng::new(12345);

    let mut endpoints: Vec<u64> = Vec::with_capacity((user_count * friends_per_user * 2) as usize);

    // Seed: small clique
    let seed = 5u64;
    for i in 0..seed {
        for j in (i + 1)..seed {
            let w = rng.weight();
            if befriend(&mut graph, i, j, w) {
                endpoints.push(i);
                endpoints.push(j);
            }
        }
    }

    for new_user in seed..user_count {
        for _ in 0..friends_per_user {
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            let w = rng.weight();
            if befriend(&mut graph, new_user, target, w) {
                endpoints.push(new_user);
                endpoints.push(target);
            }
        }
    }

    graph
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Each user befriends K neighbours on a ring, each friendship rewired to a
/// random user with probability p. High clustering, short paths.
fn gen_small_world(user_count: u64) -> SocialGraph {
    let k = 5u64;
    let p = 0.05f64;
    let mut graph = with_users(user_count);
    let mut rng = FastRng::new(67890);

    for i in 0..user_count {
        for j in 1..=k {
            let neighbour = if rng.next_f64() < p {
                rng.next(user_count)
            } else {
                (i + j) % user_count
            };
            let w = rng.weight();
            befriend(&mut graph, i, neighbour, w);
        }
    }

    graph
}

/// Erdos-Renyi: ~5 uniform random friendships per user.
fn gen_random(user_count: u64) -> SocialGraph {
    let mut graph = with_users(user_count);
    let mut rng = FastRng::new(54321);

    for _ in 0..user_count * 5 {
        let a = rng.next(user_count);
        let b = rng.next(user_count);
        let w = rng.weight();
        befriend(&mut graph, a, b, w);
    }

    graph
}

/// Barbell: two dense communities joined by a chain of bridge users.
///
/// Every path from the first community to the second squeezes through the
/// bridge.
fn gen_barbell(user_count: u64) -> SocialGraph {
    let bridge_len = 10u64;
    let community = (user_count - bridge_len) / 2;
    let mut graph = with_users(user_count);
    let mut rng = FastRng::new(99999);

    let b_start = community + bridge_len;
    for offset in [0, b_start] {
        for i in 0..community {
            for _ in 0..10u64.min(community - 1) {
                let target = rng.next(community);
                let w = rng.weight();
                befriend(&mut graph, offset + i, offset + target, w);
            }
        }
    }

    // Bridge chain: last user of A .. first user of B
    for id in (community - 1)..b_start {
        let w = rng.weight();
        befriend(&mut graph, id, id + 1, w);
    }

    graph
}
