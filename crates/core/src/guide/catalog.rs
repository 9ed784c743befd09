#![forbid(unsafe_code)]

use super::{GuideSection, GuideStep, StepPosition};

pub static SECTIONS: &[GuideSection] = &[
    GuideSection {
        id: "getting-started",
        title: "Quick start",
        description: "The basics for starting a family tree in a few clicks",
        icon: "fas fa-rocket",
        steps: &[
            GuideStep {
                id: "welcome",
                title: "Welcome to Family Tree",
                description: "A modern way to preserve your family heritage. This guide shows how to get the most out of the application.",
                icon: "fas fa-hand-holding-heart",
                target_element: None,
                position: Some(StepPosition::Center),
            },
            GuideStep {
                id: "create-first-family",
                title: "Create your first lineage",
                description: "A family groups every member of one tree. Use the \"+\" button in the sidebar to start a new story.",
                icon: "fas fa-users-rays",
                target_element: Some(".btn-add-circle"),
                position: Some(StepPosition::Right),
            },
            GuideStep {
                id: "add-first-person",
                title: "Lay the first stone",
                description: "Every tree starts with a founder. Use \"Add a member\" to create the starting point of your genealogy.",
                icon: "fas fa-user-plus",
                target_element: Some(".btn-add-member"),
                position: Some(StepPosition::Bottom),
            },
        ],
    },
    GuideSection {
        id: "family-management",
        title: "Organize & share",
        description: "Manage several families and collaborate with relatives",
        icon: "fas fa-sitemap",
        steps: &[
            GuideStep {
                id: "switch-families",
                title: "Smooth navigation",
                description: "Switch between trees from the left sidebar. Hover a family to rename or delete it.",
                icon: "fas fa-exchange-alt",
                target_element: Some(".family-card"),
                position: Some(StepPosition::Right),
            },
            GuideStep {
                id: "family-actions",
                title: "Powerful actions",
                description: "The Actions menu gathers export, duplication and advanced management tools for the current tree.",
                icon: "fas fa-wand-magic-sparkles",
                target_element: Some(".btn-actions"),
                position: Some(StepPosition::Bottom),
            },
            GuideStep {
                id: "import-export",
                title: "Data without borders",
                description: "Import JSON files and export your research to share it easily.",
                icon: "fas fa-file-export",
                target_element: Some(".btn-import"),
                position: Some(StepPosition::Bottom),
            },
        ],
    },
    GuideSection {
        id: "person-management",
        title: "Members & descendants",
        description: "Bring your ancestors to life and follow their lineage",
        icon: "fas fa-user-gear",
        steps: &[
            GuideStep {
                id: "add-children",
                title: "Extend the lineage",
                description: "Add children straight from a parent's card to build the levels of the tree.",
                icon: "fas fa-baby-carriage",
                target_element: Some(".btn-add"),
                position: Some(StepPosition::Bottom),
            },
            GuideStep {
                id: "edit-person",
                title: "Historical accuracy",
                description: "Edit details, add photos, professions or notes for every member.",
                icon: "fas fa-user-pen",
                target_element: Some(".btn-edit"),
                position: Some(StepPosition::Left),
            },
            GuideStep {
                id: "person-details",
                title: "Detailed record",
                description: "Open any card to see all information and statistics of a member.",
                icon: "fas fa-address-card",
                target_element: Some(".person-card"),
                position: Some(StepPosition::Right),
            },
        ],
    },
    GuideSection {
        id: "views-navigation",
        title: "Views & exploration",
        description: "See your tree from different angles",
        icon: "fas fa-mountain-sun",
        steps: &[
            GuideStep {
                id: "switch-views",
                title: "Multiple perspectives",
                description: "Browse your data as a classic tree, a detailed list or a timeline.",
                icon: "fas fa-layer-group",
                target_element: Some(".view-picker-buttons"),
                position: Some(StepPosition::Bottom),
            },
            GuideStep {
                id: "expand-collapse",
                title: "Managing space",
                description: "Expand or collapse every generation at once to move around large trees.",
                icon: "fas fa-up-down-left-right",
                target_element: Some(".expansion-group"),
                position: Some(StepPosition::Bottom),
            },
            GuideStep {
                id: "generation-navigation",
                title: "Travel through time",
                description: "Use the markers on the left to jump from one generation to another.",
                icon: "fas fa-list-ol",
                target_element: Some(".generation-sidebar"),
                position: Some(StepPosition::Right),
            },
        ],
    },
    GuideSection {
        id: "advanced-features",
        title: "Expert tools",
        description: "Go further in analysing your data",
        icon: "fas fa-microscope",
        steps: &[
            GuideStep {
                id: "quick-search",
                title: "Find anyone",
                description: "Quick search locates a member among hundreds instantly.",
                icon: "fas fa-magnifying-glass",
                target_element: Some(".nav-btn:nth-child(7)"),
                position: Some(StepPosition::Left),
            },
            GuideStep {
                id: "statistics",
                title: "Demographics",
                description: "See the gender split, the growth of the family and other key figures.",
                icon: "fas fa-chart-pie",
                target_element: Some(".family-stats"),
                position: Some(StepPosition::Bottom),
            },
            GuideStep {
                id: "json-manager",
                title: "Full control",
                description: "Work with the JSON database directly for bulk edits or manual backups.",
                icon: "fas fa-database",
                target_element: Some(".btn-action-primary"),
                position: Some(StepPosition::Bottom),
            },
        ],
    },
];
