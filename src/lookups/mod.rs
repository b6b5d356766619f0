//! Single-request integrations run through [`LookupFlow`]

pub mod age;
pub mod character;
pub mod cocktail;
pub mod country;
pub mod dictionary;
pub mod github;
pub mod pokemon;
pub mod random;

use crate::config::EndpointsConfig;
use crate::flow::{Flow, FlowDescriptor, Lookup, LookupFlow};
use crate::http::ApiClient;
use std::sync::Arc;

pub use age::AgeLookup;
pub use character::CharacterLookup;
pub use cocktail::CocktailLookup;
pub use country::CountryLookup;
pub use dictionary::DictionaryLookup;
pub use github::GithubLookup;
pub use pokemon::PokemonLookup;
pub use random::RandomLookup;

fn boxed<L: Lookup>(descriptor: FlowDescriptor, api: &ApiClient, lookup: L) -> Arc<dyn Flow> {
    Arc::new(LookupFlow::new(descriptor, api.clone(), lookup))
}

/// Every lookup flow in page order, all sharing one client
#[must_use]
pub fn build_all(api: &ApiClient, endpoints: &EndpointsConfig) -> Vec<Arc<dyn Flow>> {
    vec![
        boxed(character::DESCRIPTOR, api, CharacterLookup::new(&endpoints.potter)),
        boxed(random::QUOTE, api, RandomLookup::<random::Quote>::new(&endpoints.quotable)),
        boxed(country::DESCRIPTOR, api, CountryLookup::new(&endpoints.countries)),
        boxed(random::ADVICE, api, RandomLookup::<random::AdviceSlip>::new(&endpoints.advice)),
        boxed(random::CAT_FACT, api, RandomLookup::<random::CatFact>::new(&endpoints.cat_fact)),
        boxed(random::DOG_FACT, api, RandomLookup::<random::DogFact>::new(&endpoints.dog_fact)),
        boxed(random::JOKE, api, RandomLookup::<random::Joke>::new(&endpoints.joke)),
        boxed(random::MEAL, api, RandomLookup::<random::Meal>::new(&endpoints.meal)),
        boxed(age::DESCRIPTOR, api, AgeLookup::new(&endpoints.agify)),
        boxed(dictionary::DESCRIPTOR, api, DictionaryLookup::new(&endpoints.dictionary)),
        boxed(pokemon::DESCRIPTOR, api, PokemonLookup::new(&endpoints.pokeapi)),
        boxed(cocktail::DESCRIPTOR, api, CocktailLookup::new(&endpoints.cocktail)),
        boxed(github::DESCRIPTOR, api, GithubLookup::new(&endpoints.github)),
    ]
}
