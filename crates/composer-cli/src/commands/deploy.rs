use composer_core::{Artifact, Composition};
use composer_wsk::{Credentials, NullActionClient};

use crate::cli::DeployArgs;
use crate::util::{fail, parse_json, read_input};

pub fn run(args: DeployArgs) {
    if !args.offline {
        fail::<()>("no network client is bundled; pass --offline to deploy against a recording client");
    }

    let ast = parse_json(&read_input(Some(&args.ast)), "composition AST");
    let artifacts: Vec<Artifact> = match &args.artifacts {
        Some(path) => parse_json(&read_input(Some(path)), "artifacts"),
        None => Vec::new(),
    };

    let composition = Composition { node: ast, artifacts, name: Some(args.name) };

    let explicit = Credentials { apihost: args.apihost, auth: args.auth };
    let credentials = composer_wsk::read_wskprops().merge(explicit);

    let client = NullActionClient::new();
    let updated = composer_wsk::deploy(&composition, &credentials, &client).unwrap_or_else(|e| fail(e));

    println!("deployed {updated} action(s):");
    for call in client.calls() {
        println!("  {call:?}");
    }
}
