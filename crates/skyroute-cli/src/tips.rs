// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use rand::seq::SliceRandom;

const TRAVEL_TIPS: [&str; 10] = [
    "Select low-impact accommodations: stay in hotels certified for sustainable operations.",
    "Use public transport or bike: explore by transit, on foot or by bicycle instead of renting a car.",
    "Eat local and seasonal: restaurants serving local produce cut food transport emissions.",
    "Carry reusable items: a water bottle, shopping bag and utensils avoid single-use plastic.",
    "Conserve resources: switch off lights, reuse towels and keep showers short.",
    "Respect natural environments: follow site guidelines to protect wildlife and habitats.",
    "Learn about local cultures: understanding local customs makes for better visits.",
    "Choose sustainable activities: eco-tourism that funds conservation and local communities.",
    "Reduce, reuse, recycle: look for ways to cut waste wherever you travel.",
    "Support eco-friendly businesses: spend with operators that run sustainably.",
];

/// Hands out travel tips in random order without repeating until every tip
/// has been shown once.
pub struct TipDeck {
    remaining: Vec<&'static str>,
}

impl TipDeck {
    pub fn new() -> Self {
        Self {
            remaining: Vec::new(),
        }
    }

    pub fn next_tip(&mut self) -> &'static str {
        if self.remaining.is_empty() {
            self.remaining = TRAVEL_TIPS.to_vec();
            self.remaining.shuffle(&mut rand::thread_rng());
        }
        self.remaining.pop().unwrap_or(TRAVEL_TIPS[0])
    }
}
