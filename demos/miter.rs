use clap::Parser;

use nexus_bdd::aig::{Aig, AigRef};
use nexus_bdd::bdd::Bdd;
use nexus_bdd::config::BddConfig;

#[derive(Debug, Parser)]
#[command(author, version, about = "Equivalence checking of two adders via a BDD miter")]
struct Cli {
    /// Width of the adders.
    #[arg(value_name = "INT", default_value = "16")]
    bits: usize,

    /// BDD size (in bits, so the actual size is `2^size` nodes).
    #[clap(long, value_name = "INT", default_value = "20")]
    size: usize,

    /// Collect garbage after a layer once the number of live nodes exceeds this value.
    #[clap(long, value_name = "INT")]
    gc: Option<usize>,

    /// Inject a fault into the second adder (its top carry is negated).
    #[clap(long)]
    bug: bool,
}

/// Ripple-carry adder: returns the sum bits followed by the carry.
fn ripple_carry_adder(aig: &mut Aig, a: &[AigRef], b: &[AigRef], bug: bool) -> Vec<AigRef> {
    let mut outputs = Vec::with_capacity(a.len() + 1);
    let mut carry: Option<AigRef> = None;
    for (&x, &y) in a.iter().zip(b) {
        let s = aig.add_xor(x, y);
        let c = aig.add_and(x, y);
        match carry {
            None => {
                outputs.push(s);
                carry = Some(c);
            }
            Some(cin) => {
                outputs.push(aig.add_xor(s, cin));
                let t = aig.add_and(s, cin);
                carry = Some(aig.add_or(c, t));
            }
        }
    }
    outputs.extend(carry.map(|c| if bug { !c } else { c }));
    outputs
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    // Interleaved inputs a0, b0, a1, b1, ... keep the adder BDDs linear in size.
    let mut aig = Aig::new();
    let mut a = Vec::with_capacity(args.bits);
    let mut b = Vec::with_capacity(args.bits);
    for _ in 0..args.bits {
        a.push(aig.add_input());
        b.push(aig.add_input());
    }

    let lhs = ripple_carry_adder(&mut aig, &a, &b, false);
    let rhs = ripple_carry_adder(&mut aig, &b, &a, args.bug);
    let miters: Vec<AigRef> = lhs
        .iter()
        .zip(&rhs)
        .map(|(&x, &y)| aig.add_miter(x, y))
        .collect();
    println!(
        "aig: {} nodes, {} inputs, {} outputs, {} layers",
        aig.size(),
        aig.inputs().len(),
        aig.outputs().len(),
        aig.layers().len()
    );

    let bdd = Bdd::with_config(BddConfig::new(args.size));
    println!("bdd = {:?}", bdd);

    let id2node = bdd.build_aig(&aig, args.gc);
    let outputs = bdd.aig_outputs(&aig, &id2node);
    bdd.collect_garbage(&outputs);

    let num_vars = aig.inputs().len();
    let mut equivalent = true;
    for (i, (&m, &f)) in miters.iter().zip(&outputs).enumerate() {
        if bdd.is_zero(f) {
            println!("output {} ({}): equivalent", i, m);
        } else {
            equivalent = false;
            let model = bdd.one_sat(f, num_vars);
            println!(
                "output {} ({}): NOT equivalent, {} counterexamples, e.g. {:?}",
                i,
                m,
                bdd.sat_count(f, num_vars),
                model
            );
        }
    }
    println!("Circuits are {}", if equivalent { "EQUIVALENT" } else { "NOT EQUIVALENT" });

    println!("bdd = {:?}", bdd);
    println!("bdd.max_chain() = {}", bdd.max_chain());
    for stats in bdd.named_cache_stats() {
        println!("- {} (hit rate {:.1}%)", stats, 100.0 * stats.hit_rate());
    }

    let time_total = time_total.elapsed();
    println!("All done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
